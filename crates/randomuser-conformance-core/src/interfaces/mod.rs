// crates/randomuser-conformance-core/src/interfaces/mod.rs
// ============================================================================
// Module: Conformance Interfaces
// Description: Backend-agnostic transport interface for the API under test.
// Purpose: Keep HTTP client details out of the verification core.
// Dependencies: async-trait, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The core reaches the API under test only through [`Transport`]. The
//! production implementation lives in `randomuser-conformance-client`; tests
//! use in-memory fakes. Implementations must not retry: upstream flakiness is
//! meant to surface as failing test cases.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::core::ApiResponse;

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Transport-level failures reaching the API.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request URL could not be built.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    /// Connection, TLS, or timeout failure.
    #[error("request failed: {0}")]
    Request(String),
    /// Response body could not be read or exceeded the size limit.
    #[error("response body unreadable: {0}")]
    Body(String),
}

/// Issues GET requests against the API under test.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `GET <base>/<path>?<query>` and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response was received.
    async fn get(&self, path: &str, query: &[(String, String)])
    -> Result<ApiResponse, TransportError>;
}
