//! Decoding errors

use serde_json::Value;

/// Errors raised while decoding a schema or property node
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A key is present but holds the wrong kind of JSON value
    #[error("expected {expected} at {location}, found {found}")]
    UnexpectedType {
        location: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A string key holds a value outside its allowed set
    #[error("unsupported value {value:?} at {location}")]
    UnsupportedValue { location: String, value: String },
}

impl DecodeError {
    /// Build an [`DecodeError::UnexpectedType`] for `found` at `location`
    pub fn unexpected(location: &str, expected: &'static str, found: &Value) -> Self {
        Self::UnexpectedType {
            location: location.to_string(),
            expected,
            found: kind_of(found),
        }
    }

    /// Location of the offending node, as a slash separated path
    pub fn location(&self) -> &str {
        match self {
            Self::UnexpectedType { location, .. } | Self::UnsupportedValue { location, .. } => {
                location
            }
        }
    }
}

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Human readable name of a JSON value kind
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
