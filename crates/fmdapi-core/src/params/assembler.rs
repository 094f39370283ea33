//! Parameter assembly
//!
//! Copyright (c) 2025 fmdapi contributors
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::params::coerce::stringify;
use crate::params::portals::convert_portals;
use crate::params::scripts::convert_scripts;
use crate::types::Parameters;

/// Layer derived portal and script keys beneath the caller's own parameters
///
/// Precedence, lowest first: flattened portals, stringified flattened
/// scripts, then `data` itself. A key the caller sets explicitly always wins
/// over a derived one, including `portals` and `scripts`.
pub fn convert_parameters(data: &Parameters) -> Result<Parameters> {
    let mut assembled = convert_portals(data)?;
    assembled.extend(stringify(&convert_scripts(data)?));
    assembled.extend(data.iter().map(|(key, value)| (key.clone(), value.clone())));
    log::debug!(
        "assembled {} parameters from {} caller keys",
        assembled.len(),
        data.len()
    );
    Ok(assembled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn params(value: Value) -> Parameters {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_convert_parameters_layers_derived_keys() {
        let data = params(json!({
            "fieldData": {"name": "Ann"},
            "scripts": [{"name": "Log", "param": {"level": 2}}],
            "portals": [{"name": "Orders", "limit": 10}]
        }));
        let result = convert_parameters(&data).unwrap();

        assert_eq!(result.get("script"), Some(&json!("Log")));
        assert_eq!(result.get("script.param"), Some(&json!("{\"level\":2}")));
        assert_eq!(result.get("limit.Orders"), Some(&json!(10)));
        assert_eq!(result.get("fieldData"), Some(&json!({"name": "Ann"})));
    }

    #[test]
    fn test_convert_parameters_caller_keys_win() {
        let data = params(json!({
            "scripts": [{"name": "Derived"}],
            "portals": [{"name": "Orders", "limit": 10}],
            "script": "Explicit",
            "limit.Orders": "99"
        }));
        let result = convert_parameters(&data).unwrap();

        assert_eq!(result.get("script"), Some(&json!("Explicit")));
        assert_eq!(result.get("limit.Orders"), Some(&json!("99")));
        // The caller's own descriptor array replaces the derived name list.
        assert_eq!(result.get("portals"), Some(&json!([{"name": "Orders", "limit": 10}])));
        assert_eq!(result.get("scripts"), Some(&json!([{"name": "Derived"}])));
    }

    #[test]
    fn test_convert_parameters_without_descriptors() {
        let data = params(json!({"query": [{"name": "Ann"}]}));
        let result = convert_parameters(&data).unwrap();
        assert_eq!(
            Value::Object(result),
            json!({"portals": [], "query": [{"name": "Ann"}]})
        );
    }

    #[test]
    fn test_convert_parameters_script_values_are_strings() {
        let data = params(json!({"scripts": [{"name": "S", "phase": "presort", "param": 5}]}));
        let result = convert_parameters(&data).unwrap();
        assert_eq!(result.get("script.presort.param"), Some(&json!("5")));
    }
}
