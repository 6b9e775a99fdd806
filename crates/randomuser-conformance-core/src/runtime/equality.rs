// crates/randomuser-conformance-core/src/runtime/equality.rs
// ============================================================================
// Module: JSON Deep Equality
// Description: Structural comparison of JSON documents.
// Purpose: Locate the first divergence between two response bodies.
// Dependencies: serde_json, bigdecimal, crate::core::payload
// ============================================================================

//! ## Overview
//! Compares two JSON values structurally. Object keys are compared as sets,
//! independent of order; numbers are compared by decimal value, so `2` and
//! `2.0` are equal. The first divergence is reported as a JSON pointer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Number;
use serde_json::Value;

use crate::core::payload::decimal_from_number;
use crate::core::payload::kind;

// ============================================================================
// SECTION: Types
// ============================================================================

/// First point where two JSON documents differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// JSON pointer to the divergent node (`""` is the root).
    pub path: String,
    /// Human-readable description.
    pub detail: String,
}

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Returns the first divergence between `left` and `right`, or `None` when
/// they are structurally equal.
#[must_use]
pub fn first_divergence(left: &Value, right: &Value) -> Option<Divergence> {
    let mut path = String::new();
    compare(left, right, &mut path)
}

/// Recursive comparison; `path` is restored before returning.
fn compare(left: &Value, right: &Value, path: &mut String) -> Option<Divergence> {
    match (left, right) {
        (Value::Null, Value::Null) => None,
        (Value::Bool(a), Value::Bool(b)) if a == b => None,
        (Value::String(a), Value::String(b)) if a == b => None,
        (Value::Number(a), Value::Number(b)) if numbers_equal(a, b) => None,
        (Value::Array(a), Value::Array(b)) => {
            if a.len() != b.len() {
                return Some(diverge(path, format!("array length {} vs {}", a.len(), b.len())));
            }
            a.iter().zip(b).enumerate().find_map(|(index, (x, y))| {
                let mark = path.len();
                path.push('/');
                path.push_str(&index.to_string());
                let found = compare(x, y, path);
                path.truncate(mark);
                found
            })
        }
        (Value::Object(a), Value::Object(b)) => {
            let left_keys: BTreeSet<&String> = a.keys().collect();
            let right_keys: BTreeSet<&String> = b.keys().collect();
            if let Some(missing) = left_keys.difference(&right_keys).next() {
                return Some(diverge(path, format!("key `{missing}` only in first document")));
            }
            if let Some(extra) = right_keys.difference(&left_keys).next() {
                return Some(diverge(path, format!("key `{extra}` only in second document")));
            }
            left_keys.into_iter().find_map(|key| {
                let (Some(x), Some(y)) = (a.get(key), b.get(key)) else {
                    return None;
                };
                let mark = path.len();
                path.push('/');
                path.push_str(&escape_pointer(key));
                let found = compare(x, y, path);
                path.truncate(mark);
                found
            })
        }
        (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => {
            Some(diverge(path, format!("{a} vs {b}")))
        }
        (a, b) => Some(diverge(path, format!("{} vs {}", kind(a), kind(b)))),
    }
}

/// Compares numbers by decimal value, falling back to textual equality.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (decimal_from_number(a), decimal_from_number(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

/// Builds a divergence at the current path.
fn diverge(path: &str, detail: String) -> Divergence {
    Divergence {
        path: path.to_string(),
        detail,
    }
}

/// Escapes a key for use in a JSON pointer (RFC 6901).
fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
