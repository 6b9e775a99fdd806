// system-tests/src/lib.rs
// ============================================================================
// Module: Random User Conformance System Tests Library
// Description: Shared configuration for live-API system test scenarios.
// Purpose: Provide common settings for the system-test binaries.
// Dependencies: randomuser-conformance-client
// ============================================================================

//! ## Overview
//! This crate hosts the environment-driven configuration shared by the live
//! system-test binaries in `system-tests/tests`. The binaries only build with
//! the `system-tests` feature because they reach the public API over the
//! network.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
