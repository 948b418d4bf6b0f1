//! Equality conditions used by update and delete.
//!
//! A condition is a record of field name to expected value. Values compare
//! the way filter literals do: numbers numerically, strings and booleans by
//! value, anything else structurally. A key missing from the row never
//! matches, not even an expected `null`.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::types::Record;

/// True when every condition key is present on the row with an equal value.
///
/// An empty condition matches every row.
pub fn matches_all(row: &Record, condition: &Record) -> bool {
    condition
        .iter()
        .all(|(key, expected)| row.get(key).is_some_and(|v| values_equal(v, expected)))
}

/// True when some condition key, scanned in order, equals the row's value.
///
/// The first equal key decides; later keys are never consulted. An empty
/// condition matches nothing.
pub fn matches_first(row: &Record, condition: &Record) -> bool {
    condition
        .iter()
        .any(|(key, expected)| row.get(key).is_some_and(|v| values_equal(v, expected)))
}

/// Equality between two stored values.
///
/// Two integers compare exactly; f64 is only used once a float is involved.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    if let (Value::Number(a), Value::Number(b)) = (left, right) {
        return numbers_equal(a, b);
    }
    match compare_values(left, right) {
        Some(ord) => ord == Ordering::Equal,
        None => left == right,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if a.is_f64() || b.is_f64() {
        return a.as_f64() == b.as_f64();
    }
    // One side negative, the other above i64::MAX.
    false
}

/// Compare two scalar JSON values, returning an ordering if the types are comparable.
///
/// - Numbers: compared as f64
/// - Strings: compared lexicographically
/// - Booleans: false < true
/// - Null == Null
/// - Mismatched types, arrays, objects: `None`
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
