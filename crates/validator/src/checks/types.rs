//! Strict type checks: `int`, `decimal`, `boolean`.

use serde_json::Value;

/// Integer value, or string that parses cleanly as one.
///
/// Decimals are never implicitly truncated: the number `2.5` and the string
/// `"2.5"` both fail. `boolean` values fail too — `true` is not `1`.
#[must_use]
pub(crate) fn is_int(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.parse::<i64>().is_ok(),
        _ => false,
    }
}

/// Finite number, or string that parses as a finite float.
#[must_use]
pub(crate) fn is_decimal(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(f64::is_finite),
        Value::String(s) => s.parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

/// A genuine boolean only — `"true"` and `"1"` are strings and fail.
#[must_use]
pub(crate) fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}
