//! JSON number arithmetic
//!
//! Increments must keep integers integral: `1 + 1` stores `2`, not `2.0`.
//! Integer operands stay in `i64`/`u64` until they overflow, then fall back
//! to `f64`. Any float operand makes the result a float.

use serde_json::{Number, Value};

/// Add two JSON numbers
///
/// Returns `None` only when the float result is not finite, which JSON
/// cannot represent.
///
/// ```
/// use deepbase_core::{add_numbers, Number};
///
/// let sum = add_numbers(&Number::from(1), &Number::from(2)).unwrap();
/// assert_eq!(sum, Number::from(3));
/// ```
pub fn add_numbers(a: &Number, b: &Number) -> Option<Number> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if let Some(sum) = x.checked_add(y) {
            return Some(Number::from(sum));
        }
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        if let Some(sum) = x.checked_add(y) {
            return Some(Number::from(sum));
        }
    }
    // Mixed signs past the i64 range still fit once one side is negative
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_i64()) {
        if let Some(sum) = add_u64_i64(x, y) {
            return Some(sum);
        }
    }
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_u64()) {
        if let Some(sum) = add_u64_i64(y, x) {
            return Some(sum);
        }
    }
    let x = a.as_f64()?;
    let y = b.as_f64()?;
    Number::from_f64(x + y)
}

fn add_u64_i64(x: u64, y: i64) -> Option<Number> {
    if y >= 0 {
        return x.checked_add(y as u64).map(Number::from);
    }
    let magnitude = y.unsigned_abs();
    if x >= magnitude {
        Some(Number::from(x - magnitude))
    } else {
        i64::try_from(magnitude - x).ok().map(|d| Number::from(-d))
    }
}

/// Negate a JSON number
///
/// ```
/// use deepbase_core::{negate_number, Number};
///
/// assert_eq!(negate_number(&Number::from(2)), Number::from(-2));
/// ```
pub fn negate_number(n: &Number) -> Number {
    if let Some(i) = n.as_i64() {
        if let Some(neg) = i.checked_neg() {
            return Number::from(neg);
        }
    }
    if let Some(u) = n.as_u64() {
        if let Ok(i) = i64::try_from(u) {
            return Number::from(-i);
        }
    }
    let f = n.as_f64().unwrap_or(0.0);
    Number::from_f64(-f).unwrap_or_else(|| Number::from(0))
}

/// Numeric view of a stored value for increment fallbacks
///
/// - missing or `null` counts as `0`
/// - a number is returned as-is
/// - anything else is `Err` carrying its JSON type name
pub fn number_or_zero(value: Option<&Value>) -> Result<Number, &'static str> {
    match value {
        None | Some(Value::Null) => Ok(Number::from(0)),
        Some(Value::Number(n)) => Ok(n.clone()),
        Some(other) => Err(type_name(other)),
    }
}

/// JSON type name of a value
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
