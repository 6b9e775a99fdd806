// crates/randomuser-conformance-core/src/core/response.rs
// ============================================================================
// Module: Raw API Response
// Description: Transport-neutral snapshot of one HTTP response.
// Purpose: Give verifiers status, content type, and body without HTTP deps.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`ApiResponse`] is what a [`crate::Transport`] hands back: the status code,
//! the `content-type` header (if any), and the body decoded as UTF-8. It is
//! created fresh for every request and discarded after verification.
//! Bodies that are not valid UTF-8 keep a lossy rendering for reports and a
//! `decode_error`; verifiers treat such a body as unparseable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Snapshot of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw `content-type` header value.
    pub content_type: Option<String>,
    /// Response body; lossy when `decode_error` is set.
    pub body: String,
    /// UTF-8 decode failure of the raw body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

impl ApiResponse {
    /// Builds a response snapshot.
    #[must_use]
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(ToString::to_string),
            body: body.into(),
            decode_error: None,
        }
    }

    /// Builds a response snapshot from raw body bytes.
    ///
    /// Invalid UTF-8 is recorded in `decode_error` instead of being repaired
    /// silently.
    #[must_use]
    pub fn from_bytes(status: u16, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(body) => Self::new(status, content_type, body),
            Err(err) => {
                let decode_error = format!("body is not valid UTF-8: {}", err.utf8_error());
                let body = String::from_utf8_lossy(err.as_bytes()).into_owned();
                Self {
                    decode_error: Some(decode_error),
                    ..Self::new(status, content_type, body)
                }
            }
        }
    }

    /// Builds an `application/json` response from a JSON value.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, Some("application/json; charset=utf-8"), body.to_string())
    }

    /// Returns true for statuses in `[200, 300)`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true when the content type names JSON (case-insensitive).
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
    }
}
