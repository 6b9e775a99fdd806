// crates/randomuser-conformance-core/src/core/payload.rs
// ============================================================================
// Module: Response Payload Schema
// Description: Typed records for Random User API response bodies.
// Purpose: Validate body shape once so verifiers work on typed records.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`ResponsePayload::from_value`] is the parse boundary: it checks that the
//! body is an object, that `results` (when present) is an array of objects,
//! and that the fields under test carry the expected JSON types. Everything
//! past this point works with [`Person`] and [`Info`] instead of raw maps.
//! The original JSON is kept alongside for deep-equality and diagnostics.
//! Invariants:
//! - Fields not under test are never type-checked.
//! - Absent fields stay `None`; inclusion/exclusion rules may remove any of them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Gender
// ============================================================================

/// Gender accepted by the `gender` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// `male`.
    Male,
    /// `female`.
    Female,
}

impl Gender {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("unknown gender `{other}`")),
        }
    }
}

/// Gender value as returned by the API, which may fall outside [`Gender`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GenderValue {
    /// A recognized gender.
    Known(Gender),
    /// Any other string.
    Other(String),
}

impl GenderValue {
    /// Returns the recognized gender, if any.
    #[must_use]
    pub const fn known(&self) -> Option<Gender> {
        match self {
            Self::Known(gender) => Some(*gender),
            Self::Other(_) => None,
        }
    }
}

impl From<String> for GenderValue {
    fn from(raw: String) -> Self {
        raw.parse().map_or(Self::Other(raw), Self::Known)
    }
}

impl fmt::Display for GenderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(gender) => gender.fmt(f),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// `login` sub-object of a person record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Login {
    /// Stable identity key.
    pub uuid: Option<String>,
    /// Generated password.
    pub password: Option<String>,
}

/// One record of the `results` array.
///
/// # Invariants
/// - `keys` holds every top-level key of `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// `gender` field.
    pub gender: Option<GenderValue>,
    /// `nat` country code.
    pub nat: Option<String>,
    /// `login` sub-object.
    pub login: Option<Login>,
    /// Top-level key set, sorted.
    pub keys: BTreeSet<String>,
    /// Original record.
    pub raw: Value,
}

/// `info` block of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Info {
    /// Seed echoed by the API.
    pub seed: Option<String>,
    /// Page number.
    pub page: Option<u64>,
    /// Result count.
    pub results: Option<u64>,
    /// API version string.
    pub version: Option<String>,
}

/// Parsed success body.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsePayload {
    /// `results` array, when present.
    pub results: Option<Vec<Person>>,
    /// `info` block, when present.
    pub info: Option<Info>,
    /// Original body.
    pub raw: Value,
}

/// Parsed error body.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    /// `error` field when the body is an object that carries one.
    pub error: Option<Value>,
    /// Original body.
    pub raw: Value,
}

impl ErrorPayload {
    /// Wraps a parsed JSON error body.
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let error = raw.as_object().and_then(|map| map.get("error")).cloned();
        Self {
            error,
            raw,
        }
    }

    /// Returns true when the body is not an object or carries an `error` field.
    ///
    /// Only object bodies are required to name `error`; JSON strings, arrays,
    /// numbers, and `null` pass unchecked.
    #[must_use]
    pub fn has_error_field(&self) -> bool {
        !self.raw.is_object() || self.error.is_some()
    }
}

// ============================================================================
// SECTION: Parse Boundary
// ============================================================================

impl ResponsePayload {
    /// Validates a JSON body into a typed payload.
    ///
    /// # Errors
    ///
    /// Returns a description of the first shape mismatch.
    pub fn from_value(raw: Value) -> Result<Self, String> {
        let map =
            raw.as_object().ok_or_else(|| format!("body is {}, not an object", kind(&raw)))?;
        let results = match map.get("results") {
            None => None,
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        Person::from_value(item).map_err(|err| format!("results[{index}]: {err}"))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(other) => return Err(format!("`results` is {}, not an array", kind(other))),
        };
        let info = map.get("info").map(Info::from_value).transpose()?;
        Ok(Self {
            results,
            info,
            raw,
        })
    }

    /// Returns the `results` array or a shape failure description.
    ///
    /// # Errors
    ///
    /// Returns an error when the body has no `results` array.
    pub fn require_results(&self) -> Result<&[Person], String> {
        self.results.as_deref().ok_or_else(|| "response has no results array".to_string())
    }
}

impl Person {
    /// Validates one record.
    fn from_value(raw: &Value) -> Result<Self, String> {
        let map =
            raw.as_object().ok_or_else(|| format!("record is {}, not an object", kind(raw)))?;
        let login = match map.get("login") {
            None => None,
            Some(Value::Object(login)) => Some(Login {
                uuid: optional_string(login, "uuid", "login.uuid")?,
                password: optional_string(login, "password", "login.password")?,
            }),
            Some(other) => return Err(format!("`login` is {}, not an object", kind(other))),
        };
        Ok(Self {
            gender: optional_string(map, "gender", "gender")?.map(GenderValue::from),
            nat: optional_string(map, "nat", "nat")?,
            login,
            keys: map.keys().cloned().collect(),
            raw: raw.clone(),
        })
    }

    /// Returns the login password, if present.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.login.as_ref().and_then(|login| login.password.as_deref())
    }

    /// Returns the login uuid, if present.
    #[must_use]
    pub fn uuid(&self) -> Option<&str> {
        self.login.as_ref().and_then(|login| login.uuid.as_deref())
    }
}

impl Info {
    /// Validates the `info` block.
    fn from_value(raw: &Value) -> Result<Self, String> {
        let map =
            raw.as_object().ok_or_else(|| format!("`info` is {}, not an object", kind(raw)))?;
        Ok(Self {
            seed: optional_string(map, "seed", "info.seed")?,
            page: optional_integer(map, "page", "info.page")?,
            results: optional_integer(map, "results", "info.results")?,
            version: optional_string(map, "version", "info.version")?,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an optional string field; `null` counts as absent.
fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    label: &str,
) -> Result<Option<String>, String> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(format!("`{label}` is {}, not a string", kind(other))),
    }
}

/// Reads an optional non-negative integer field; integral decimals such as
/// `2.0` are accepted.
fn optional_integer(
    map: &Map<String, Value>,
    key: &str,
    label: &str,
) -> Result<Option<u64>, String> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => integral_u64(number)
            .map(Some)
            .ok_or_else(|| format!("`{label}` is {number}, not a non-negative integer")),
        Some(other) => Err(format!("`{label}` is {}, not a number", kind(other))),
    }
}

/// Returns the value of an integral, non-negative JSON number.
fn integral_u64(number: &Number) -> Option<u64> {
    if let Some(value) = number.as_u64() {
        return Some(value);
    }
    let decimal = decimal_from_number(number)?;
    if decimal.is_integer() { decimal.to_u64() } else { None }
}

/// Parses a JSON number into `BigDecimal` with a stable string representation.
pub(crate) fn decimal_from_number(number: &Number) -> Option<BigDecimal> {
    BigDecimal::from_str(&number.to_string()).ok()
}

/// Names the JSON type of a value for diagnostics.
pub(crate) const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
