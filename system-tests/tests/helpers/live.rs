// system-tests/tests/helpers/live.rs
// ============================================================================
// Module: Live API Harness
// Description: Transport and scenario helpers for live system-tests.
// Purpose: Run scenarios against the configured endpoint and persist results.
// Dependencies: system-tests, randomuser-conformance-client, randomuser-conformance-core
// ============================================================================

use std::error::Error;

use randomuser_conformance_client::HttpTransport;
use randomuser_conformance_core::Catalog;
use randomuser_conformance_core::Scenario;
use randomuser_conformance_core::ScenarioOutcome;
use randomuser_conformance_core::run_scenario;
use system_tests::config::SystemTestConfig;

use super::artifacts::TestReporter;

/// Live endpoint harness owning one transport and catalog.
pub struct LiveHarness {
    transport: HttpTransport,
    catalog: Catalog,
}

impl LiveHarness {
    /// Builds a harness from the system-test environment and the standard catalog.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        Self::with_catalog(Catalog::standard())
    }

    /// Builds a harness from the system-test environment and a custom catalog.
    pub fn with_catalog(catalog: Catalog) -> Result<Self, Box<dyn Error>> {
        let config = SystemTestConfig::load()?;
        let transport = HttpTransport::new(config.transport_config()?)?;
        Ok(Self {
            transport,
            catalog,
        })
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Runs scenarios one after another in the given order.
    pub async fn run(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            outcomes.push(run_scenario(&self.transport, &self.catalog, *scenario).await);
        }
        outcomes
    }

    /// Writes outcomes and the transcript, finishes the reporter, and returns
    /// the failure lines.
    pub fn record(
        &self,
        reporter: &mut TestReporter,
        outcomes: &[ScenarioOutcome],
    ) -> Result<Vec<String>, Box<dyn Error>> {
        reporter.artifacts().write_json("outcomes.json", &outcomes)?;
        reporter.artifacts().write_json("transcript.json", &self.transport.transcript())?;
        let failures = failure_lines(outcomes);
        let status = if failures.is_empty() { "pass" } else { "fail" };
        let mut notes = vec![format!(
            "{} scenarios against {}",
            outcomes.len(),
            self.transport.config().base_url
        )];
        notes.extend(failures.iter().cloned());
        reporter.finish(
            status,
            notes,
            vec![
                "summary.json".to_string(),
                "summary.md".to_string(),
                "outcomes.json".to_string(),
                "transcript.json".to_string(),
            ],
        )?;
        Ok(failures)
    }
}

/// Formats one line per failed outcome.
pub fn failure_lines(outcomes: &[ScenarioOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|outcome| {
            outcome.failure.as_ref().map(|failure| {
                format!("{} [{}]: {}", outcome.name, failure.kind.as_str(), failure.message)
            })
        })
        .collect()
}
