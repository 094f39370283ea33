//! Outbound value coercion
//!
//! Every value the Data API receives as a parameter is a string. Values are
//! classified once into a [`FieldValue`] and rendered from there: text passes
//! through, numbers and booleans use their plain text form, and composites
//! (objects, arrays and null) are JSON-encoded.

use crate::types::Parameters;
use serde_json::{Number, Value};

/// Classification of a parameter value for wire rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(&'a Number),
    Boolean(bool),
    /// Objects, arrays and null
    Composite(&'a Value),
}

impl<'a> FieldValue<'a> {
    /// Classify a JSON value
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Text(text),
            Value::Number(number) => FieldValue::Number(number),
            Value::Bool(flag) => FieldValue::Boolean(*flag),
            Value::Null | Value::Array(_) | Value::Object(_) => FieldValue::Composite(value),
        }
    }

    /// Render the value as a wire string
    pub fn to_wire_string(&self) -> String {
        match self {
            FieldValue::Text(text) => (*text).to_string(),
            FieldValue::Number(number) => number_to_string(number),
            FieldValue::Boolean(flag) => flag.to_string(),
            // Serializing a `Value` cannot fail: map keys are always strings.
            FieldValue::Composite(value) => value.to_string(),
        }
    }
}

/// Render a number the way a JavaScript client prints it
///
/// Integers print as-is. Floats use the shortest round-trip digits, so
/// `10.0` becomes `"10"` and `-0.0` becomes `"0"`. Magnitudes of `1e21` and
/// above, or below `1e-6`, switch to exponent form with an explicit sign
/// (`"1e+21"`, `"1.5e-7"`).
pub fn number_to_string(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.is_finite() => float_to_string(float),
        _ => number.to_string(),
    }
}

fn float_to_string(float: f64) -> String {
    if float == 0.0 {
        return "0".to_string();
    }
    let magnitude = float.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return float.to_string();
    }
    // `{:e}` gives `1e21` and `1.5e-7`; only positive exponents need a sign
    let rendered = format!("{:e}", float);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => rendered,
    }
}

/// Convert every value in `data` to its string representation
pub fn stringify(data: &Parameters) -> Parameters {
    data.iter()
        .map(|(key, value)| {
            let text = FieldValue::classify(value).to_wire_string();
            (key.clone(), Value::String(text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_stringify_mixed_values() {
        let data = params(json!({"a": 1, "b": {"x": 1}, "c": "s", "d": null}));
        assert_eq!(
            Value::Object(stringify(&data)),
            json!({"a": "1", "b": "{\"x\":1}", "c": "s", "d": "null"})
        );
    }

    #[test]
    fn test_stringify_arrays_and_booleans() {
        let data = params(json!({"list": ["Orders", "Items"], "flag": true, "off": false}));
        assert_eq!(
            Value::Object(stringify(&data)),
            json!({"list": "[\"Orders\",\"Items\"]", "flag": "true", "off": "false"})
        );
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(&Number::from(10)), "10");
        assert_eq!(number_to_string(&Number::from(-3)), "-3");
        assert_eq!(number_to_string(&Number::from_f64(1.5).unwrap()), "1.5");
        assert_eq!(number_to_string(&Number::from_f64(10.0).unwrap()), "10");
    }

    #[test]
    fn test_number_to_string_exponent_range() {
        let float = |f: f64| number_to_string(&Number::from_f64(f).unwrap());
        assert_eq!(float(1e21), "1e+21");
        assert_eq!(float(-2.5e22), "-2.5e+22");
        assert_eq!(float(1.5e-7), "1.5e-7");
        assert_eq!(float(1e20), "100000000000000000000");
        assert_eq!(float(0.000001), "0.000001");
        assert_eq!(float(-0.0), "0");
    }

    #[test]
    fn test_classify() {
        assert_eq!(FieldValue::classify(&json!("x")), FieldValue::Text("x"));
        assert_eq!(FieldValue::classify(&json!(true)), FieldValue::Boolean(true));
        assert!(matches!(FieldValue::classify(&json!(null)), FieldValue::Composite(_)));
        assert!(matches!(FieldValue::classify(&json!(2)), FieldValue::Number(_)));
    }

    #[test]
    fn test_every_value_becomes_a_string() {
        let data = params(json!({"a": 1.25, "b": [], "c": {}, "d": "", "e": null}));
        assert!(stringify(&data).values().all(Value::is_string));
    }
}
