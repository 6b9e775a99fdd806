// crates/randomuser-conformance-cli/src/runner.rs
// ============================================================================
// Module: Suite Runner
// Description: Bounded parallel fan-out of conformance scenarios.
// Purpose: Run independent scenarios concurrently and keep suite order.
// Dependencies: randomuser-conformance-core, tokio, tracing
// ============================================================================

//! ## Overview
//! Scenarios share nothing but the transport and the catalog, so they are
//! spawned onto a [`JoinSet`] with a [`Semaphore`] capping how many are in
//! flight. Outcomes are returned in the order the scenarios were given,
//! regardless of completion order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use randomuser_conformance_core::Catalog;
use randomuser_conformance_core::Scenario;
use randomuser_conformance_core::ScenarioOutcome;
use randomuser_conformance_core::Transport;
use randomuser_conformance_core::run_scenario;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

// ============================================================================
// SECTION: Fan-Out
// ============================================================================

/// Runs `scenarios` with at most `parallelism` in flight.
///
/// # Errors
///
/// Returns an error when a scenario task panics or is cancelled.
pub(crate) async fn run_suite<T>(
    transport: Arc<T>,
    catalog: Arc<Catalog>,
    scenarios: &[Scenario],
    parallelism: usize,
) -> Result<Vec<ScenarioOutcome>, String>
where
    T: Transport + 'static,
{
    let gate = Arc::new(Semaphore::new(parallelism.max(1)));
    let mut joins = JoinSet::new();
    for (index, scenario) in scenarios.iter().copied().enumerate() {
        let transport = Arc::clone(&transport);
        let catalog = Arc::clone(&catalog);
        let gate = Arc::clone(&gate);
        joins.spawn(async move {
            let _permit = gate.acquire_owned().await.map_err(|err| err.to_string())?;
            let outcome = run_scenario(transport.as_ref(), &catalog, scenario).await;
            tracing::info!(
                scenario = %outcome.name,
                status = outcome.status.as_str(),
                requests = outcome.requests,
                "scenario finished"
            );
            Ok::<_, String>((index, outcome))
        });
    }

    let mut slots: Vec<Option<ScenarioOutcome>> = vec![None; scenarios.len()];
    while let Some(joined) = joins.join_next().await {
        let (index, outcome) = joined.map_err(|err| format!("scenario task failed: {err}"))??;
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(outcome);
        }
    }
    slots
        .into_iter()
        .zip(scenarios)
        .map(|(slot, scenario)| slot.ok_or_else(|| format!("scenario {scenario} produced no outcome")))
        .collect()
}
