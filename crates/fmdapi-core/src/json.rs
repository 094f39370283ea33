//! JSON probing helpers
//!
//! The Data API returns some values (script results, container metadata) as
//! JSON documents encoded inside strings. These helpers test for that without
//! ever failing.

use serde_json::Value;

/// Test whether a string is a complete JSON document
pub fn is_json_str(text: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}

/// Test whether a value parses as JSON
///
/// Strings are parsed. Numbers, booleans and null are JSON by construction.
/// Objects and arrays are not JSON text and report `false`.
pub fn is_json(value: &Value) -> bool {
    match value {
        Value::String(text) => is_json_str(text),
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Parse a string value that holds JSON, returning the value unchanged otherwise
pub fn decode_json_value(value: &Value) -> Value {
    match value {
        Value::String(text) => serde_json::from_str(text).unwrap_or_else(|_| value.clone()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_json_str() {
        assert!(is_json_str("{\"x\":1}"));
        assert!(is_json_str("1"));
        assert!(is_json_str("\"quoted\""));
        assert!(is_json_str(" [1, 2] "));
        assert!(!is_json_str("plain text"));
        assert!(!is_json_str(""));
        assert!(!is_json_str("{\"x\":"));
    }

    #[test]
    fn test_is_json_on_values() {
        assert!(is_json(&json!("true")));
        assert!(is_json(&json!(5)));
        assert!(is_json(&json!(null)));
        assert!(is_json(&json!(false)));
        assert!(!is_json(&json!({"a": 1})));
        assert!(!is_json(&json!([1])));
        assert!(!is_json(&json!("01/02/2024")));
    }

    #[test]
    fn test_decode_json_value() {
        assert_eq!(decode_json_value(&json!("{\"x\":1}")), json!({"x": 1}));
        assert_eq!(decode_json_value(&json!("1")), json!(1));
        assert_eq!(decode_json_value(&json!("Smith")), json!("Smith"));
        assert_eq!(decode_json_value(&json!([1])), json!([1]));
    }
}
