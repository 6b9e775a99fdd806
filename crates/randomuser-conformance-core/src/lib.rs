// crates/randomuser-conformance-core/src/lib.rs
// ============================================================================
// Module: Random User Conformance Core
// Description: Parameter catalog, payload schema, and response verifiers.
// Purpose: Decide pass/fail for the Random User API contract rules.
// Dependencies: serde, serde_json, bigdecimal, thiserror, async-trait
// ============================================================================

//! ## Overview
//! This crate holds the decision logic of the Random User conformance suite:
//! a [`Catalog`] of query parameter sets per contract rule, a typed
//! [`ResponsePayload`] schema validated once at the parse boundary, the
//! password-policy DSL, and one verifier per contract rule. Network access is
//! abstracted behind the [`Transport`] interface; this crate never opens a
//! socket.
//! Invariants:
//! - Every test case builds its own [`ParameterSet`]; no state is shared.
//! - Responses are parsed fresh per request and never cached.
//! - Verifiers report failures as values, never panics.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::ApiResponse;
pub use crate::core::Catalog;
pub use crate::core::CharClass;
pub use crate::core::ConformanceError;
pub use crate::core::ErrorPayload;
pub use crate::core::FailureKind;
pub use crate::core::Gender;
pub use crate::core::GenderValue;
pub use crate::core::Info;
pub use crate::core::LengthBound;
pub use crate::core::Login;
pub use crate::core::ParamValue;
pub use crate::core::ParameterSet;
pub use crate::core::PasswordPolicy;
pub use crate::core::PasswordViolation;
pub use crate::core::Person;
pub use crate::core::PolicyError;
pub use crate::core::ResponsePayload;
pub use crate::core::Rule;
pub use crate::core::serialize;
pub use crate::interfaces::Transport;
pub use crate::interfaces::TransportError;
pub use crate::runtime::FailureRecord;
pub use crate::runtime::PasswordCase;
pub use crate::runtime::Scenario;
pub use crate::runtime::ScenarioOutcome;
pub use crate::runtime::ScenarioStatus;
pub use crate::runtime::run_scenario;
