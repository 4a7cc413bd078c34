//! Parameter normalisation and query-string serialisation.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};

/// Request parameters, kept in insertion order.
pub type Params = Map<String, Value>;

/// Characters left alone when encoding a key: the unreserved URI component set.
const KEY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Values additionally keep the reserved URI delimiters.
const VALUE_SET: &AsciiSet = &KEY_SET
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Returns a trimmed copy of `value`.
///
/// Strings lose surrounding whitespace, maps get trimmed keys and recursively trimmed
/// values, sequences are trimmed element-wise and integer-valued numbers become their
/// decimal string. Everything else is returned as is.
pub fn trim(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Object(map) => Value::Object(trim_params(map)),
        Value::Array(items) => Value::Array(items.iter().map(trim).collect()),
        Value::Number(n) => match integer_string(n) {
            Some(s) => Value::String(s),
            None => value.clone(),
        },
        Value::Bool(_) | Value::Null => value.clone(),
    }
}

pub fn trim_params(params: &Params) -> Params {
    params
        .iter()
        .map(|(key, value)| (key.trim().to_string(), trim(value)))
        .collect()
}

fn integer_string(n: &serde_json::Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => Some(float_integer_string(f)),
        _ => None,
    }
}

/// Decimal digits below 1e21, exponent form (`1e+21`) from there on.
fn float_integer_string(f: f64) -> String {
    if f.abs() < 1e21 {
        return format!("{f:.0}");
    }
    let exponent_form = format!("{f:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) => format!("{mantissa}e+{exponent}"),
        None => exponent_form,
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(scalar_string).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Serialises `params` as `key=value` pairs joined by `&`, in iteration order.
pub fn encode(params: &Params) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, KEY_SET),
                utf8_percent_encode(&scalar_string(value), VALUE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
