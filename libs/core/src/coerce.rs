//! Best-effort conversion of loosely-typed JSON values into typed leaves.
//!
//! Card payloads in the wild carry numbers where strings are expected, string
//! booleans, and numeric enum ordinals. Every function here is pure and total:
//! a value that cannot be converted yields the supplied default.

use serde_json::Value;

use crate::enums::Token;

/// Returns the string content of `value`, or `default` for any other shape.
pub fn coerce_str(value: &Value, default: &str) -> String {
    str_opt(value).map(str::to_string).unwrap_or_else(|| default.to_string())
}

/// Returns the numeric content of `value`, or `default` for any other shape.
pub fn coerce_number(value: &Value, default: f64) -> f64 {
    number_opt(value).unwrap_or(default)
}

/// Returns the boolean content of `value`, or `default` for any other shape.
/// The strings `"true"` and `"false"` count as booleans.
pub fn coerce_bool(value: &Value, default: bool) -> bool {
    bool_opt(value).unwrap_or(default)
}

/// Resolves `value` against `E`'s token table, falling back to `default`.
///
/// Strings match case-insensitively; integers are treated as ordinals into
/// the declared variant order.
pub fn coerce_enum<E: Token>(value: &Value, default: E) -> E {
    enum_opt(value).unwrap_or(default)
}

pub fn str_opt(value: &Value) -> Option<&str> {
    value.as_str()
}

pub fn number_opt(value: &Value) -> Option<f64> {
    value.as_f64()
}

pub fn bool_opt(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn enum_opt<E: Token>(value: &Value) -> Option<E> {
    match value {
        Value::String(token) => E::lookup(token),
        Value::Number(number) => number
            .as_u64()
            .and_then(|index| usize::try_from(index).ok())
            .and_then(E::ordinal),
        _ => None,
    }
}
