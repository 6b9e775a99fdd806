// crates/randomuser-conformance-core/src/core/mod.rs
// ============================================================================
// Module: Conformance Core Types
// Description: Data model for parameters, payloads, policies, and failures.
// Purpose: Group the typed building blocks shared by verifiers and scenarios.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types are plain values: parameter sets, the catalog, the password
//! policy, parsed payloads, and the failure taxonomy. None of them hold
//! process-wide state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod error;
pub mod params;
pub mod password;
pub mod payload;
pub mod response;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::Catalog;
pub use catalog::Rule;
pub use error::ConformanceError;
pub use error::FailureKind;
pub use params::ParamValue;
pub use params::ParameterSet;
pub use params::serialize;
pub use password::CharClass;
pub use password::LengthBound;
pub use password::PasswordPolicy;
pub use password::PasswordViolation;
pub use password::PolicyError;
pub use payload::ErrorPayload;
pub use payload::Gender;
pub use payload::GenderValue;
pub use payload::Info;
pub use payload::Login;
pub use payload::Person;
pub use payload::ResponsePayload;
pub use response::ApiResponse;
