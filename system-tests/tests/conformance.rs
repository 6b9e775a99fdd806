// system-tests/tests/conformance.rs
// ============================================================================
// Module: Conformance Suite
// Description: Aggregates live contract-rule system tests into one binary.
// Purpose: Reduce binaries while keeping live rule coverage centralized.
// Dependencies: suites/*, helpers
// ============================================================================

//! ## Overview
//! Aggregates live contract-rule system tests into one binary.
//! Invariants:
//! - Every test reaches the endpoint named by `RANDOMUSER_SYSTEM_TEST_BASE_URL`.
//! - Requests are never retried.

mod helpers;

#[path = "suites/errors.rs"]
mod errors;
#[path = "suites/fields.rs"]
mod fields;
#[path = "suites/filters.rs"]
mod filters;
