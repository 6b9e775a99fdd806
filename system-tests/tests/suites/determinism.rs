// system-tests/tests/suites/determinism.rs
// ============================================================================
// Module: Determinism Tests
// Description: Live coverage for seeded pagination.
// Purpose: Ensure identical seed/page requests yield identical bodies.
// Dependencies: system-tests helpers, randomuser-conformance-core
// ============================================================================

//! ## Overview
//! Live coverage for seeded pagination. The scenario compares two identical
//! requests; the page test checks that moving to the next page under the same
//! seed changes the records.

use randomuser_conformance_core::Catalog;
use randomuser_conformance_core::ParameterSet;
use randomuser_conformance_core::Rule;
use randomuser_conformance_core::Scenario;
use randomuser_conformance_core::Transport;
use randomuser_conformance_core::runtime::scenario::ROOT_PATH;
use randomuser_conformance_core::runtime::verifier;
use randomuser_conformance_core::serialize;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::live::LiveHarness;

#[tokio::test(flavor = "multi_thread")]
async fn seeded_page_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("seeded_page_is_repeatable")?;
    let harness = LiveHarness::from_env()?;
    let outcomes = harness.run(&[Scenario::SeededDeterminism]).await;
    let failures = harness.record(&mut reporter, &outcomes)?;
    if !failures.is_empty() {
        return Err(failures.join("\n").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn next_page_changes_records() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("next_page_changes_records")?;
    let harness = LiveHarness::from_env()?;
    let catalog = Catalog::standard();
    let first_page = catalog.build_params(Rule::SeededPage, None);
    let page = first_page.get_text("page").and_then(|raw| raw.parse::<u64>().ok()).unwrap_or(1);
    let overrides = ParameterSet::new().with("page", page + 1);
    let next_page = catalog.build_params(Rule::SeededPage, Some(&overrides));

    let transport = harness.transport();
    let first = transport.get(ROOT_PATH, &serialize(&first_page)).await?;
    let second = transport.get(ROOT_PATH, &serialize(&next_page)).await?;
    reporter.artifacts().write_json("transcript.json", &transport.transcript())?;

    let first_uuids = verifier::login_uuids(&verifier::parse_structured(&first)?);
    let second_uuids = verifier::login_uuids(&verifier::parse_structured(&second)?);
    if first_uuids.is_empty() || first_uuids == second_uuids {
        return Err(format!("pages {page} and {} returned the same records", page + 1).into());
    }
    reporter.finish(
        "pass",
        vec!["seeded pages differ across page numbers".to_string()],
        vec![
            "summary.json".to_string(),
            "summary.md".to_string(),
            "transcript.json".to_string(),
        ],
    )?;
    Ok(())
}
