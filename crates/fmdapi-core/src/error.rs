//! Error types for the fmdapi core library
//!
//! This module defines the error handling system for the shaping pipeline,
//! using thiserror for ergonomic error definitions and anyhow for flexible
//! error contexts.

use std::fmt;
use thiserror::Error;

/// Main error type for fmdapi operations
#[derive(Error, Debug)]
pub enum Error {
    /// A field required by the wire convention was absent
    #[error("Missing required field '{field}' in {context}")]
    MissingField {
        field: String,
        context: String,
    },

    /// A value had the wrong JSON kind for the position it occupies
    #[error("Invalid shape in {context}: expected {expected}, found {found}")]
    InvalidShape {
        expected: String,
        found: JsonKind,
        context: String,
    },

    /// The Data API reported a non-zero message code
    #[error("Data API error {code}: {message}")]
    Api {
        code: String,
        message: String,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors (allow-lists, presets)
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The JSON kind of a value, used when reporting shape mismatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify a JSON value
    pub fn of(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonKind::Null => write!(f, "null"),
            JsonKind::Boolean => write!(f, "boolean"),
            JsonKind::Number => write!(f, "number"),
            JsonKind::String => write!(f, "string"),
            JsonKind::Array => write!(f, "array"),
            JsonKind::Object => write!(f, "object"),
        }
    }
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Error::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create a shape mismatch error for `value`
    pub fn invalid_shape(
        expected: impl Into<String>,
        value: &serde_json::Value,
        context: impl Into<String>,
    ) -> Self {
        Error::InvalidShape {
            expected: expected.into(),
            found: JsonKind::of(value),
            context: context.into(),
        }
    }

    /// Create a configuration error without a source
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_field_display() {
        let err = Error::missing_field("fieldData", "record");
        assert_eq!(err.to_string(), "Missing required field 'fieldData' in record");
    }

    #[test]
    fn test_invalid_shape_reports_kind() {
        let err = Error::invalid_shape("object", &json!([1, 2]), "script descriptor");
        assert_eq!(
            err.to_string(),
            "Invalid shape in script descriptor: expected object, found array"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn test_json_kind_of() {
        assert_eq!(JsonKind::of(&json!(null)), JsonKind::Null);
        assert_eq!(JsonKind::of(&json!("x")), JsonKind::String);
        assert_eq!(JsonKind::of(&json!({})), JsonKind::Object);
    }
}
