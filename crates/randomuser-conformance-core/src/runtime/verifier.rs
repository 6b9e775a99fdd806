// crates/randomuser-conformance-core/src/runtime/verifier.rs
// ============================================================================
// Module: Response Verifiers
// Description: One predicate per Random User API contract rule.
// Purpose: Decide pass/fail for a rule given a raw response.
// Dependencies: serde_json, crate::core, crate::runtime::equality
// ============================================================================

//! ## Overview
//! Each verifier consumes an [`ApiResponse`] and checks exactly one contract
//! property. Positive-path verifiers first run [`parse_structured`], which
//! centralizes the "garbage response" failures (non-2xx status, non-JSON
//! body, wrong top-level structure) as [`ConformanceError::Shape`]. Semantic
//! failures are [`ConformanceError::Contract`] and carry the offending
//! record.
//! Invariants:
//! - A body without `results` is a shape failure, distinct from an empty list.
//! - Key-set comparisons are order-independent.
//! - Numbers are compared by value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Value;
use serde_json::json;

use crate::core::ApiResponse;
use crate::core::ConformanceError;
use crate::core::ErrorPayload;
use crate::core::Gender;
use crate::core::GenderValue;
use crate::core::PasswordPolicy;
use crate::core::Person;
use crate::core::ResponsePayload;
use crate::core::error::pretty;
use crate::runtime::equality::first_divergence;

// ============================================================================
// SECTION: Rule Labels
// ============================================================================

/// Label for result-count violations.
const RULE_COUNT: &str = "result_count";
/// Label for gender filter violations.
const RULE_GENDER: &str = "gender";
/// Label for invalid-gender degradation violations.
const RULE_GENDER_INVALID: &str = "gender_invalid";
/// Label for password policy violations.
const RULE_PASSWORD: &str = "password";
/// Label for nationality violations.
const RULE_NAT: &str = "nationality";
/// Label for inclusion violations.
const RULE_INC: &str = "inclusion";
/// Label for exclusion violations.
const RULE_EXC: &str = "exclusion";
/// Label for error-path violations.
const RULE_ERROR: &str = "error";

// ============================================================================
// SECTION: Structural Precondition
// ============================================================================

/// Parses a success response into a typed payload.
///
/// # Errors
///
/// Returns [`ConformanceError::Shape`] when the status is outside
/// `[200, 300)`, the body is not JSON, or the JSON does not match the
/// response schema.
pub fn parse_structured(response: &ApiResponse) -> Result<ResponsePayload, ConformanceError> {
    if !response.is_success() {
        return Err(ConformanceError::shape(
            format!("unexpected HTTP status {}", response.status),
            response.body.clone(),
        ));
    }
    if let Some(reason) = &response.decode_error {
        return Err(ConformanceError::shape(
            format!("response was not JSON: {reason}"),
            response.body.clone(),
        ));
    }
    let raw: Value = serde_json::from_str(&response.body).map_err(|err| {
        ConformanceError::shape(format!("response was not JSON: {err}"), response.body.clone())
    })?;
    let body = pretty(&raw);
    ResponsePayload::from_value(raw).map_err(|reason| ConformanceError::shape(reason, body))
}

/// Returns the `results` array or a shape failure.
fn results_of(payload: &ResponsePayload) -> Result<&[Person], ConformanceError> {
    payload
        .require_results()
        .map_err(|reason| ConformanceError::shape(reason, pretty(&payload.raw)))
}

// ============================================================================
// SECTION: Verifiers
// ============================================================================

/// Checks that `results` holds exactly `expected` records.
///
/// # Errors
///
/// Returns a shape failure when `results` is missing and a contract
/// violation on count mismatch.
pub fn verify_count(response: &ApiResponse, expected: usize) -> Result<(), ConformanceError> {
    let payload = parse_structured(response)?;
    let results = results_of(&payload)?;
    if results.len() != expected {
        return Err(ConformanceError::contract(
            RULE_COUNT,
            format!("expected {expected} results, got {}", results.len()),
            &payload.raw,
        ));
    }
    Ok(())
}

/// Checks that every record has gender `expected`.
///
/// # Errors
///
/// Returns a contract violation naming the first record with another gender.
pub fn verify_gender(response: &ApiResponse, expected: Gender) -> Result<(), ConformanceError> {
    let payload = parse_structured(response)?;
    for (index, person) in results_of(&payload)?.iter().enumerate() {
        let actual = person.gender.as_ref().and_then(GenderValue::known);
        if actual != Some(expected) {
            let shown = shown_gender(person);
            return Err(ConformanceError::contract(
                RULE_GENDER,
                format!("results[{index}].gender is {shown}, expected {expected}"),
                &person.raw,
            ));
        }
    }
    Ok(())
}

/// Checks that an unrecognized gender filter degrades to unfiltered results:
/// the call succeeds and every gender is `male` or `female`.
///
/// # Errors
///
/// Returns a shape failure on non-success status and a contract violation
/// when any gender falls outside `{male, female}`.
pub fn verify_gender_degrades(response: &ApiResponse) -> Result<(), ConformanceError> {
    let payload = parse_structured(response)?;
    for (index, person) in results_of(&payload)?.iter().enumerate() {
        if person.gender.as_ref().and_then(GenderValue::known).is_none() {
            return Err(ConformanceError::contract(
                RULE_GENDER_INVALID,
                format!(
                    "results[{index}].gender {} is not in {{male, female}}",
                    shown_gender(person)
                ),
                &person.raw,
            ));
        }
    }
    Ok(())
}

/// Checks every `login.password` against `policy`.
///
/// # Errors
///
/// Returns a contract violation for a missing password, a length outside the
/// bound, or a character outside the allowed class union.
pub fn verify_password(
    response: &ApiResponse,
    policy: &PasswordPolicy,
) -> Result<(), ConformanceError> {
    let payload = parse_structured(response)?;
    for (index, person) in results_of(&payload)?.iter().enumerate() {
        let Some(password) = person.password() else {
            return Err(ConformanceError::contract(
                RULE_PASSWORD,
                format!("results[{index}] has no login.password"),
                &person.raw,
            ));
        };
        if let Err(violation) = policy.check(password) {
            return Err(ConformanceError::contract(
                RULE_PASSWORD,
                format!("results[{index}] password `{password}` violates `{policy}`: {violation}"),
                &person.raw,
            ));
        }
    }
    Ok(())
}

/// Checks that every record's `nat` is in `allowed` (ASCII case-insensitive).
///
/// # Errors
///
/// Returns a contract violation naming the first record outside the set.
pub fn verify_nationalities(
    response: &ApiResponse,
    allowed: &BTreeSet<String>,
) -> Result<(), ConformanceError> {
    let payload = parse_structured(response)?;
    let allowed: BTreeSet<String> = allowed.iter().map(|nat| nat.to_ascii_uppercase()).collect();
    for (index, person) in results_of(&payload)?.iter().enumerate() {
        let nat = person.nat.as_deref().map(str::to_ascii_uppercase);
        if !nat.as_ref().is_some_and(|nat| allowed.contains(nat)) {
            return Err(ConformanceError::contract(
                RULE_NAT,
                format!(
                    "results[{index}].nat {} is not in [{}]",
                    nat.as_deref().unwrap_or("<missing>"),
                    join(allowed.iter())
                ),
                &person.raw,
            ));
        }
    }
    Ok(())
}

/// Checks that every record's top-level key set equals `expected` exactly.
///
/// # Errors
///
/// Returns a contract violation listing missing and extra keys.
pub fn verify_included_keys(
    response: &ApiResponse,
    expected: &BTreeSet<String>,
) -> Result<(), ConformanceError> {
    let payload = parse_structured(response)?;
    for (index, person) in results_of(&payload)?.iter().enumerate() {
        if &person.keys != expected {
            let missing = join(expected.difference(&person.keys));
            let extra = join(person.keys.difference(expected));
            return Err(ConformanceError::contract(
                RULE_INC,
                format!("results[{index}] keys differ: missing [{missing}], extra [{extra}]"),
                &person.raw,
            ));
        }
    }
    Ok(())
}

/// Checks that no record carries the top-level key `excluded`.
///
/// # Errors
///
/// Returns a contract violation naming the first record that has the key.
pub fn verify_excluded_key(response: &ApiResponse, excluded: &str) -> Result<(), ConformanceError> {
    let payload = parse_structured(response)?;
    for (index, person) in results_of(&payload)?.iter().enumerate() {
        if person.keys.contains(excluded) {
            return Err(ConformanceError::contract(
                RULE_EXC,
                format!("results[{index}] still has excluded key `{excluded}`"),
                &person.raw,
            ));
        }
    }
    Ok(())
}

/// Checks that two responses to identical seeded requests are identical.
///
/// # Errors
///
/// Returns a shape failure when either body lacks a `results` array and a
/// determinism violation when `info.page`, `info.seed`, or any other node
/// diverges.
pub fn verify_determinism(
    first: &ApiResponse,
    second: &ApiResponse,
) -> Result<(), ConformanceError> {
    let a = parse_structured(first)?;
    let b = parse_structured(second)?;
    if a.results.is_none() || b.results.is_none() {
        return Err(ConformanceError::shape(
            "determinism responses must both carry a results array",
            pretty(&json!({ "first": a.raw, "second": b.raw })),
        ));
    }
    let info_a = a.info.clone().unwrap_or_default();
    let info_b = b.info.clone().unwrap_or_default();
    if info_a.page != info_b.page {
        return Err(determinism_error(
            "/info/page",
            format!("page {} vs {}", shown(info_a.page), shown(info_b.page)),
            &a,
            &b,
        ));
    }
    if info_a.seed != info_b.seed {
        return Err(determinism_error(
            "/info/seed",
            format!("seed {} vs {}", shown(info_a.seed), shown(info_b.seed)),
            &a,
            &b,
        ));
    }
    if let Some(divergence) = first_divergence(&a.raw, &b.raw) {
        return Err(determinism_error(&divergence.path, divergence.detail, &a, &b));
    }
    Ok(())
}

/// Checks the error path: status `>= 400`, and for JSON bodies an `error`
/// field (possibly empty). Non-JSON error bodies are accepted as-is.
///
/// # Errors
///
/// Returns a contract violation for a status below 400 or a JSON object body
/// without `error`, and a shape failure when a JSON-typed body does not parse.
pub fn verify_error(response: &ApiResponse) -> Result<(), ConformanceError> {
    if response.status < 400 {
        return Err(ConformanceError::Contract {
            rule: RULE_ERROR,
            detail: format!("expected status >= 400, got {}", response.status),
            context: response.body.clone(),
        });
    }
    if !response.is_json() {
        return Ok(());
    }
    if let Some(reason) = &response.decode_error {
        return Err(ConformanceError::shape(
            format!("error body was not JSON: {reason}"),
            response.body.clone(),
        ));
    }
    let raw: Value = serde_json::from_str(&response.body).map_err(|err| {
        ConformanceError::shape(format!("error body was not JSON: {err}"), response.body.clone())
    })?;
    let payload = ErrorPayload::from_value(raw);
    if !payload.has_error_field() {
        return Err(ConformanceError::contract(
            RULE_ERROR,
            "JSON error body has no `error` field",
            &payload.raw,
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the `login.uuid` of every record that has one, in order.
#[must_use]
pub fn login_uuids(payload: &ResponsePayload) -> Vec<String> {
    payload
        .results
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|person| person.uuid().map(ToString::to_string))
        .collect()
}

/// Renders a record's gender for messages.
fn shown_gender(person: &Person) -> String {
    person.gender.as_ref().map_or_else(|| "<missing>".to_string(), ToString::to_string)
}

/// Renders an optional value for messages.
fn shown<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "<missing>".to_string(), |value| value.to_string())
}

/// Joins items with `, ` for messages.
fn join<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Builds a determinism violation with both bodies and their identity keys.
fn determinism_error(
    path: &str,
    detail: String,
    a: &ResponsePayload,
    b: &ResponsePayload,
) -> ConformanceError {
    let context = json!({
        "first": { "uuids": login_uuids(a), "body": a.raw },
        "second": { "uuids": login_uuids(b), "body": b.raw },
    });
    ConformanceError::Determinism {
        path: path.to_string(),
        detail,
        context: pretty(&context),
    }
}
