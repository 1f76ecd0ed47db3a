//! Raw-data coercions of the scalar field kinds.

use crate::value::Value;
use serde_json::Value as JsonValue;

/// Numeric coercion. Anything that does not read as a number becomes `Null`.
pub(crate) fn number(raw: &JsonValue) -> Value {
    match raw {
        JsonValue::Number(_) => Value::from_json(raw),
        JsonValue::Bool(b) => Value::Int(i64::from(*b)),
        JsonValue::String(s) => parse_number(s.trim()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => Value::Null,
    }
}

fn parse_number(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Int(i);
    }

    match s.parse::<f64>() {
        Ok(f) if !f.is_nan() => Value::Float(f),
        _ => Value::Null,
    }
}

/// Integer parse: the leading, optionally signed, decimal digits of the
/// input. Unparsable input becomes `Null`.
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn integer(raw: &JsonValue) -> Value {
    match raw {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                match n.as_f64().map(f64::trunc) {
                    Some(f) if f.is_finite() && f.abs() < 9.2e18 => Value::Int(f as i64),
                    _ => Value::Null,
                }
            }
        }
        JsonValue::String(s) => parse_integer_prefix(s),
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Array(_) | JsonValue::Object(_) => {
            Value::Null
        }
    }
}

fn parse_integer_prefix(s: &str) -> Value {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => ("-", &s[1..]),
        Some(b'+') => ("", &s[1..]),
        _ => ("", s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Value::Null;
    }

    format!("{sign}{}", &rest[..digits])
        .parse::<i64>()
        .map_or(Value::Null, Value::Int)
}

/// Boolean coercion. Strings read as form input: `""`, `false`, `0`, `no`
/// and `off` are false, any other text is true.
pub(crate) fn boolean(raw: &JsonValue) -> Value {
    match raw {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => Value::Bool(n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan())),
        JsonValue::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            Value::Bool(!matches!(s.as_str(), "" | "false" | "0" | "no" | "off"))
        }
        JsonValue::Array(_) | JsonValue::Object(_) => Value::Bool(true),
    }
}

/// Identifier coercion: scalars become their string form, everything else
/// is copied as it is. Lists and objects have no canonical string form, so
/// stringifying them would only produce an identifier nothing can match.
pub(crate) fn identifier(raw: &JsonValue) -> Value {
    match raw {
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Bool(_) | JsonValue::Number(_) => Value::Text(Value::from_json(raw).to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => Value::from_json(raw),
    }
}

///
/// TESTS
///
