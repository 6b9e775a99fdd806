// crates/randomuser-conformance-core/tests/proptest_equality.rs
// ============================================================================
// Module: JSON Equality Property-Based Tests
// Description: Property tests for structural JSON comparison.
// Purpose: Ensure comparison is reflexive and compares numbers by value.
// ============================================================================

//! Property-based tests for the determinism comparison invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use randomuser_conformance_core::runtime::first_divergence;
use serde_json::Number;
use serde_json::Value;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const EXACT_F64_LIMIT: i64 = 1 << 53;

fn json_value_strategy(max_depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        (-EXACT_F64_LIMIT ..= EXACT_F64_LIMIT).prop_map(|v| Value::Number(v.into())),
        any::<f64>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(|v| Number::from_f64(v).map_or(Value::Null, Value::Number)),
        ".*".prop_map(Value::String),
    ];

    leaf.prop_recursive(max_depth, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0 .. 4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// Replaces every integer that converts to `f64` exactly with that float.
fn floatify(value: &Value) -> Value {
    match value {
        Value::Number(number) => number
            .as_i64()
            .filter(|n| n.abs() <= EXACT_F64_LIMIT)
            .and_then(|n| Number::from_f64(n as f64))
            .map_or_else(|| value.clone(), Value::Number),
        Value::Array(items) => Value::Array(items.iter().map(floatify).collect()),
        Value::Object(map) => {
            Value::Object(map.iter().map(|(key, item)| (key.clone(), floatify(item))).collect())
        }
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn comparison_is_reflexive(value in json_value_strategy(4)) {
        prop_assert_eq!(first_divergence(&value, &value), None);
    }

    #[test]
    fn integers_equal_their_exact_floats(value in json_value_strategy(4)) {
        let floated = floatify(&value);
        prop_assert_eq!(first_divergence(&value, &floated), None);
        prop_assert_eq!(first_divergence(&floated, &value), None);
    }

    #[test]
    fn integer_and_float_leaves_compare_by_value(n in -EXACT_F64_LIMIT ..= EXACT_F64_LIMIT) {
        let integer = Value::Number(n.into());
        let float = Value::Number(Number::from_f64(n as f64).unwrap());
        prop_assert_eq!(first_divergence(&integer, &float), None);
        let shifted = Value::Number(Number::from_f64(n as f64 + 0.5).unwrap());
        if (n as f64 + 0.5).fract() != 0.0 {
            prop_assert!(first_divergence(&integer, &shifted).is_some());
        }
    }
}
