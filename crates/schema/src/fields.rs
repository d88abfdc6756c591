//! Typed accessors over generic JSON nodes
//!
//! Absent keys always decode to `None`; present keys of the wrong kind are errors.

use crate::error::{DecodeError, DecodeResult};
use serde_json::{Map, Value};

/// Join a location path with a child key, escaping it as a JSON pointer segment
pub fn child(location: &str, key: &str) -> String {
    let key = key.replace('~', "~0").replace('/', "~1");
    if location.is_empty() {
        key
    } else {
        format!("{location}/{key}")
    }
}

/// Require a node to be a mapping
pub fn as_mapping<'a>(node: &'a Value, location: &str) -> DecodeResult<&'a Map<String, Value>> {
    node.as_object()
        .ok_or_else(|| DecodeError::unexpected(location, "mapping", node))
}

pub fn string(node: &Value, key: &str, location: &str) -> DecodeResult<Option<String>> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(DecodeError::unexpected(&child(location, key), "string", other)),
    }
}

pub fn boolean(node: &Value, key: &str, location: &str) -> DecodeResult<bool> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(DecodeError::unexpected(&child(location, key), "boolean", other)),
    }
}

pub fn number(node: &Value, key: &str, location: &str) -> DecodeResult<Option<f64>> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(DecodeError::unexpected(&child(location, key), "number", other)),
    }
}

pub fn unsigned(node: &Value, key: &str, location: &str) -> DecodeResult<Option<u64>> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| DecodeError::unexpected(&child(location, key), "unsigned integer", value)),
        Some(other) => Err(DecodeError::unexpected(
            &child(location, key),
            "unsigned integer",
            other,
        )),
    }
}

/// Sequence of strings, e.g. `required`, `tags`, `consumes`
pub fn string_list(node: &Value, key: &str, location: &str) -> DecodeResult<Vec<String>> {
    let location = child(location, key);
    match node.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(DecodeError::unexpected(&location, "string", other)),
            })
            .collect(),
        Some(other) => Err(DecodeError::unexpected(&location, "array", other)),
    }
}

/// Sequence of scalars rendered as strings, used for `enum`
pub fn scalar_list(node: &Value, key: &str, location: &str) -> DecodeResult<Vec<String>> {
    let location = child(location, key);
    match node.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Array(_) | Value::Object(_) => {
                    Err(DecodeError::unexpected(&location, "scalar", item))
                }
                scalar => Ok(scalar.to_string()),
            })
            .collect(),
        Some(other) => Err(DecodeError::unexpected(&location, "array", other)),
    }
}

/// Raw value passthrough for opaque fields such as `default` and `example`
pub fn opaque(node: &Value, key: &str) -> Option<Value> {
    node.get(key).filter(|v| !v.is_null()).cloned()
}
