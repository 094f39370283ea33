//! Small value helpers shared across the pipeline

use serde_json::Value;

/// Wrap a single value in a sequence, or return a sequence unchanged
pub fn to_array(data: Value) -> Vec<Value> {
    match data {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Remove the named properties from an object, or from every object in a sequence
///
/// Values that are not objects are returned unchanged.
#[deprecated(note = "filter outbound keys with `sanitize_parameters` instead")]
pub fn omit<S: AsRef<str>>(data: &Value, properties: &[S]) -> Value {
    match data {
        Value::Array(items) => Value::Array(items.iter().map(|item| strip(item, properties)).collect()),
        other => strip(other, properties),
    }
}

fn strip<S: AsRef<str>>(value: &Value, properties: &[S]) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .iter()
                .filter(|(key, _)| !properties.iter().any(|p| p.as_ref() == key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
