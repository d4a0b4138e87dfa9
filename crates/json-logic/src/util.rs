//! Coercion helpers shared by every operator.
//!
//! All operators agree on one table for truthiness, string and number
//! conversion, structural equivalence and loose equality; keeping them here
//! is what makes `{"==": ...}`, `{"in": ...}` and `{"cat": ...}` behave
//! consistently on the same inputs.

use crate::error::{LogicError, Result};
use serde_json::{Number, Value};
use std::cmp::Ordering;

// ----------------------------------------------------------------- Type helpers

/// Returns the JSON type name of a value, as used in error messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `false`, `null`, `0`, `""` and `[]` are falsy. Everything else,
/// including `{}`, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

// ----------------------------------------------------------------- Conversions

/// Renders a value as a string.
///
/// Numbers use their shortest decimal form (`3`, not `3.0`), `null` renders
/// as the empty string and arrays join their elements with `,`. Objects have
/// no string form and yield `None`, as does any array containing one.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(",")),
        Value::Object(_) => None,
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    n.as_f64().map(format_f64).unwrap_or_else(|| n.to_string())
}

/// Formats a float without a trailing `.0` when it is integral.
pub fn format_f64(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Converts a value to a number.
///
/// Strings are trimmed and parsed, the empty string counting as `0`.
/// `null` is `0` and booleans are `1`/`0`. Arrays, objects and strings
/// that do not parse have no numeric form.
pub fn numberify(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok().filter(|f| f.is_finite())
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Wraps a float as a JSON number, preferring an integer representation.
///
/// Non-finite results have no JSON form and become `null`.
pub fn number_value(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e18 {
        return Value::from(f as i64);
    }
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

// ----------------------------------------------------------------- Equality

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Type-aware deep equality.
///
/// Numbers compare by value (`1` and `1.0` are equivalent), objects ignore
/// key order, arrays compare element-wise in order. Values of different JSON
/// types are never equivalent, so `3` and `"3"` differ.
pub fn equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equivalent(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| equivalent(x, y)))
        }
        _ => false,
    }
}

/// Equality with type coercion, as used by `==` and `!=`.
///
/// Same-typed operands use [`equivalent`]. `null` only equals `null`.
/// Otherwise both sides are converted to numbers; if either has no numeric
/// form their string forms are compared instead.
pub fn loose_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ if json_type(a) == json_type(b) => equivalent(a, b),
        _ => match (numberify(a), numberify(b)) {
            (Some(x), Some(y)) => x == y,
            _ => match (stringify(a), stringify(b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        },
    }
}

/// Orders two values for the relational operators.
///
/// Two strings compare lexically; anything else compares numerically and
/// fails when an operand has no numeric form.
pub fn compare(a: &Value, b: &Value) -> Result<Option<Ordering>> {
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return Ok(Some(x.cmp(y)));
    }
    match (numberify(a), numberify(b)) {
        (Some(x), Some(y)) => Ok(x.partial_cmp(&y)),
        _ => Err(LogicError::evaluation(format!(
            "Cannot compare {} and {}.",
            json_type(a),
            json_type(b)
        ))),
    }
}

// ----------------------------------------------------------------- Paths

/// Resolves a dot-separated path such as `user.tags.0` inside a value.
///
/// Object segments are keys; array segments must be decimal indices.
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
