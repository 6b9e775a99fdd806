// crates/randomuser-conformance-core/src/core/error.rs
// ============================================================================
// Module: Conformance Failures
// Description: Failure taxonomy for a single conformance test case.
// Purpose: Classify failures as transport, shape, contract, or determinism.
// Dependencies: thiserror, serde, crate::interfaces
// ============================================================================

//! ## Overview
//! Every verifier returns [`ConformanceError`] on failure. Messages embed the
//! offending payload pretty-printed so a failure can be diagnosed without
//! re-running against the live API. Failures are local to one test case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::password::PolicyError;
use crate::interfaces::TransportError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure of one conformance test case.
///
/// # Invariants
/// - Variants are stable for programmatic handling and reporting.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// The API could not be reached.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// The response was not the expected JSON structure.
    #[error("shape error: {reason}\n{body}")]
    Shape {
        /// What was wrong with the structure.
        reason: String,
        /// Raw or pretty-printed body.
        body: String,
    },
    /// The response parsed but broke a contract rule.
    #[error("contract violation [{rule}]: {detail}\n{context}")]
    Contract {
        /// Rule label.
        rule: &'static str,
        /// What failed.
        detail: String,
        /// Offending record or value, pretty-printed.
        context: String,
    },
    /// Two responses that must be identical diverged.
    #[error("determinism violation at `{path}`: {detail}\n{context}")]
    Determinism {
        /// JSON pointer of the first divergence.
        path: String,
        /// What diverged.
        detail: String,
        /// Both bodies, pretty-printed.
        context: String,
    },
    /// The password policy under test could not be parsed.
    #[error("invalid password policy: {0}")]
    Policy(#[from] PolicyError),
}

impl ConformanceError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Transport,
            Self::Shape {
                ..
            } => FailureKind::Shape,
            Self::Contract {
                ..
            } => FailureKind::Contract,
            Self::Determinism {
                ..
            } => FailureKind::Determinism,
            Self::Policy(_) => FailureKind::Policy,
        }
    }

    /// Builds a shape failure carrying the raw body.
    #[must_use]
    pub fn shape(reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Shape {
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// Builds a contract violation with a pretty-printed JSON context.
    #[must_use]
    pub fn contract(
        rule: &'static str,
        detail: impl Into<String>,
        context: &serde_json::Value,
    ) -> Self {
        Self::Contract {
            rule,
            detail: detail.into(),
            context: pretty(context),
        }
    }
}

/// Failure classification used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// [`ConformanceError::Transport`].
    Transport,
    /// [`ConformanceError::Shape`].
    Shape,
    /// [`ConformanceError::Contract`].
    Contract,
    /// [`ConformanceError::Determinism`].
    Determinism,
    /// [`ConformanceError::Policy`].
    Policy,
}

impl FailureKind {
    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Shape => "shape",
            Self::Contract => "contract",
            Self::Determinism => "determinism",
            Self::Policy => "policy",
        }
    }
}

/// Pretty-prints JSON for failure messages.
#[must_use]
pub fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
