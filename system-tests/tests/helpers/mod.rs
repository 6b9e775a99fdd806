// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for live conformance system-tests.
// Purpose: Provide the live transport harness and artifact utilities.
// Dependencies: system-tests, randomuser-conformance-client, randomuser-conformance-core
// ============================================================================

//! ## Overview
//! Shared helpers for live conformance system-tests.
//! Invariants:
//! - Every test writes `summary.json` and `summary.md`, even on panic.
//! - Each test owns its transport, so transcripts never interleave.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod live;
