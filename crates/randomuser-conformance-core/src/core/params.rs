// crates/randomuser-conformance-core/src/core/params.rs
// ============================================================================
// Module: Query Parameter Sets
// Description: Ordered parameter sets and their transport serialization.
// Purpose: Carry the named query values sent with one API request.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ParameterSet`] is an insertion-ordered mapping from parameter name to a
//! scalar [`ParamValue`]. The transport only accepts string values, so
//! [`serialize`] renders every value through its canonical [`fmt::Display`]
//! form (`10` becomes `"10"`, never a locale-formatted string).
//! Invariants:
//! - Keys are unique; inserting an existing key replaces the value in place.
//! - Serialization preserves insertion order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Parameter Values
// ============================================================================

/// Scalar value of a single query parameter.
///
/// # Invariants
/// - Every variant has a lossless string rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag rendered as `true`/`false`.
    Bool(bool),
    /// Unsigned integer (result counts, page numbers).
    Unsigned(u64),
    /// Signed integer.
    Integer(i64),
    /// Free-form text, passed through unchanged.
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Unsigned(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Unsigned(u64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// ============================================================================
// SECTION: Parameter Set
// ============================================================================

/// Insertion-ordered set of named query parameters for one request.
///
/// # Invariants
/// - Parameter names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    /// Ordered `(name, value)` entries.
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`ParameterSet::insert`].
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a parameter, keeping the original position on replace.
    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| key == name) {
            slot.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    /// Returns the canonical string form of the value stored under `name`.
    #[must_use]
    pub fn get_text(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }

    /// Returns a copy with `overrides` merged on top; overrides win on collision.
    #[must_use]
    pub fn merge(&self, overrides: &Self) -> Self {
        let mut merged = self.clone();
        for (name, value) in &overrides.entries {
            merged.insert(name, value.clone());
        }
        merged
    }

    /// Returns the number of parameters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no parameters are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            let name: String = name.into();
            set.insert(&name, value);
        }
        set
    }
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Converts every parameter value to its string form for transport.
#[must_use]
pub fn serialize(params: &ParameterSet) -> Vec<(String, String)> {
    params.iter().map(|(name, value)| (name.to_string(), value.to_string())).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::ParamValue;
    use super::ParameterSet;
    use super::serialize;

    #[test]
    fn numbers_serialize_without_formatting() {
        let params = ParameterSet::new().with("results", 10_u32).with("page", 1_000_000_u64);
        assert_eq!(
            serialize(&params),
            vec![
                ("results".to_string(), "10".to_string()),
                ("page".to_string(), "1000000".to_string()),
            ]
        );
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut params = ParameterSet::new().with("gender", "male").with("results", 5_u32);
        params.insert("gender", "female");
        assert_eq!(params.len(), 2);
        assert_eq!(params.iter().next().map(|(name, _)| name), Some("gender"));
        assert_eq!(params.get("gender"), Some(&ParamValue::Text("female".to_string())));
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = ParameterSet::new().with("nat", "us").with("results", 20_u32);
        let overrides = ParameterSet::new().with("results", 3_u32).with("inc", "nat");
        let merged = base.merge(&overrides);
        assert_eq!(merged.get_text("results").as_deref(), Some("3"));
        assert_eq!(merged.get_text("inc").as_deref(), Some("nat"));
        assert_eq!(merged.get_text("nat").as_deref(), Some("us"));
        assert_eq!(base.get_text("results").as_deref(), Some("20"));
    }

    #[test]
    fn booleans_and_negative_integers_render_plainly() {
        let params = ParameterSet::new().with("noinfo", true).with("offset", -4_i64);
        assert_eq!(params.get_text("noinfo").as_deref(), Some("true"));
        assert_eq!(params.get_text("offset").as_deref(), Some("-4"));
    }
}
