// system-tests/tests/suites/fields.rs
// ============================================================================
// Module: Field Selection Tests
// Description: Live coverage for nationality, inclusion, and exclusion rules.
// Purpose: Ensure record shape follows `nat`, `inc`, and `exc`.
// Dependencies: system-tests helpers, randomuser-conformance-core
// ============================================================================

//! ## Overview
//! Live coverage for nationality, inclusion, and exclusion rules, plus a
//! catalog override that narrows nationalities to a single code.

use randomuser_conformance_core::Catalog;
use randomuser_conformance_core::ParameterSet;
use randomuser_conformance_core::Rule;
use randomuser_conformance_core::Scenario;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::live::LiveHarness;

#[tokio::test(flavor = "multi_thread")]
async fn field_selection() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("field_selection")?;
    let harness = LiveHarness::from_env()?;
    let outcomes = harness
        .run(&[Scenario::NationalitySet, Scenario::IncludeFields, Scenario::ExcludeField])
        .await;
    let failures = harness.record(&mut reporter, &outcomes)?;
    if !failures.is_empty() {
        return Err(failures.join("\n").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn single_nationality_override() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("single_nationality_override")?;
    let standard = Catalog::standard();
    let narrowed = standard.entry(Rule::NatMulti).merge(&ParameterSet::new().with("nat", "de"));
    let harness = LiveHarness::with_catalog(standard.with_entry(Rule::NatMulti, narrowed))?;
    let outcomes = harness.run(&[Scenario::NationalitySet]).await;
    let failures = harness.record(&mut reporter, &outcomes)?;
    if !failures.is_empty() {
        return Err(failures.join("\n").into());
    }
    let transcript = harness.transport().transcript();
    let sent_nat = transcript
        .first()
        .and_then(|entry| entry.query.iter().find(|(key, _)| key == "nat"))
        .map(|(_, value)| value.as_str());
    if sent_nat != Some("de") {
        return Err(format!("override not sent: nat = {}", sent_nat.unwrap_or("<missing>")).into());
    }
    Ok(())
}
