// crates/randomuser-conformance-client/src/lib.rs
// ============================================================================
// Module: Random User Conformance Client
// Description: HTTP transport and runtime configuration for the suite.
// Purpose: Connect the verification core to a live Random User endpoint.
// Dependencies: randomuser-conformance-core, reqwest, toml, tracing
// ============================================================================

//! ## Overview
//! This crate supplies the production [`randomuser_conformance_core::Transport`]
//! ([`HttpTransport`]) and the [`ConformanceConfig`] that selects the target
//! endpoint, request limits, run parallelism, and catalog overrides.
//! Invariants:
//! - Requests are never retried.
//! - Response bodies are bounded by `max_response_bytes`.
//! - Configuration fails closed on invalid input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::ConformanceConfig;
pub use config::RunConfig;
pub use config::TargetConfig;
pub use http::HttpTransport;
pub use http::HttpTransportConfig;
pub use http::TranscriptEntry;
