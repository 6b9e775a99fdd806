// system-tests/tests/suites/filters.rs
// ============================================================================
// Module: Filter Rule Tests
// Description: Live coverage for gender, password, and result-count rules.
// Purpose: Ensure the endpoint honors filtering and generation parameters.
// Dependencies: system-tests helpers, randomuser-conformance-core
// ============================================================================

//! ## Overview
//! Live coverage for gender, password, and result-count rules.
//! Invariants:
//! - Each test owns a transport and writes its own transcript.

use randomuser_conformance_core::Gender;
use randomuser_conformance_core::PasswordCase;
use randomuser_conformance_core::Scenario;
use randomuser_conformance_core::runtime::scenario::STANDARD_RESULT_COUNTS;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::live::LiveHarness;

#[tokio::test(flavor = "multi_thread")]
async fn gender_filtering() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("gender_filtering")?;
    let harness = LiveHarness::from_env()?;
    let outcomes = harness
        .run(&[
            Scenario::GenderFilter(Gender::Female),
            Scenario::GenderFilter(Gender::Male),
            Scenario::GenderInvalid,
        ])
        .await;
    let failures = harness.record(&mut reporter, &outcomes)?;
    if !failures.is_empty() {
        return Err(failures.join("\n").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn password_policies() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("password_policies")?;
    let harness = LiveHarness::from_env()?;
    let outcomes = harness
        .run(&[
            Scenario::Password(PasswordCase::Simple),
            Scenario::Password(PasswordCase::Special),
            Scenario::Password(PasswordCase::Complex),
        ])
        .await;
    let failures = harness.record(&mut reporter, &outcomes)?;
    if !failures.is_empty() {
        return Err(failures.join("\n").into());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn result_counts() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("result_counts")?;
    let harness = LiveHarness::from_env()?;
    let scenarios: Vec<Scenario> =
        STANDARD_RESULT_COUNTS.into_iter().map(Scenario::ResultCount).collect();
    let outcomes = harness.run(&scenarios).await;
    let failures = harness.record(&mut reporter, &outcomes)?;
    if !failures.is_empty() {
        return Err(failures.join("\n").into());
    }
    let requests: u32 = outcomes.iter().map(|outcome| outcome.requests).sum();
    if requests as usize != scenarios.len() {
        return Err(format!("expected one request per count, sent {requests}").into());
    }
    Ok(())
}
