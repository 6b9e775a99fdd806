// system-tests/tests/suites/errors.rs
// ============================================================================
// Module: Error Path Tests
// Description: Live coverage for requests to unknown paths.
// Purpose: Ensure unknown paths return an error status and shape.
// Dependencies: system-tests helpers, randomuser-conformance-core
// ============================================================================

use randomuser_conformance_core::Scenario;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::live::LiveHarness;

#[tokio::test(flavor = "multi_thread")]
async fn invalid_path_returns_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("invalid_path_returns_error")?;
    let harness = LiveHarness::from_env()?;
    let outcomes = harness.run(&[Scenario::InvalidPath]).await;
    let failures = harness.record(&mut reporter, &outcomes)?;
    if !failures.is_empty() {
        return Err(failures.join("\n").into());
    }
    Ok(())
}
