// crates/randomuser-conformance-core/src/runtime/mod.rs
// ============================================================================
// Module: Conformance Runtime
// Description: Verifiers, structural equality, and the scenario driver.
// Purpose: Turn raw responses into pass/fail outcomes.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime layer holds the rule verifiers, the JSON deep-equality used by
//! the determinism check, and the scenario driver that ties catalog entries,
//! transport calls, and verifiers together.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod equality;
pub mod scenario;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use equality::Divergence;
pub use equality::first_divergence;
pub use scenario::FailureRecord;
pub use scenario::PasswordCase;
pub use scenario::Scenario;
pub use scenario::ScenarioOutcome;
pub use scenario::ScenarioStatus;
pub use scenario::run_scenario;
