//! Portal descriptor flattening
//!
//! Each portal descriptor contributes its pagination as `limit.<portal>` and
//! `offset.<portal>` keys, and its name to the `portals` list. The encoder is
//! a fold over the descriptors that yields the ordered name list and the
//! merged flattened fields together.
//!
//! Copyright (c) 2025 fmdapi contributors
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::types::{Parameters, PORTALS_KEY};
use serde_json::{Map, Value};

/// Result of folding a sequence of portal descriptors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortalFold {
    /// Portal names in declaration order
    pub names: Vec<String>,
    /// Flattened descriptor fields, later descriptors overwriting earlier ones
    pub fields: Map<String, Value>,
}

impl PortalFold {
    /// Fold one more descriptor into the accumulator
    fn push(mut self, descriptor: &Value, index: usize) -> Result<Self> {
        let context = format!("portals[{}]", index);
        let object = descriptor
            .as_object()
            .ok_or_else(|| Error::invalid_shape("object", descriptor, context.as_str()))?;
        let name = match object.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => return Err(Error::invalid_shape("string", other, format!("{}.name", context))),
            None => return Err(Error::missing_field("name", context)),
        };

        for (key, value) in object {
            match key.as_str() {
                "name" => {}
                "limit" => {
                    self.fields.insert(format!("limit.{}", name), value.clone());
                }
                "offset" => {
                    self.fields.insert(format!("offset.{}", name), value.clone());
                }
                _ => {
                    self.fields.insert(key.clone(), value.clone());
                }
            }
        }
        self.names.push(name);
        Ok(self)
    }

    /// Merge into `{portals: [names...], ...fields}`
    ///
    /// A descriptor field literally named `portals` overrides the name list.
    pub fn into_parameters(self) -> Parameters {
        let mut parameters = Parameters::new();
        parameters.insert(
            PORTALS_KEY.to_string(),
            Value::Array(self.names.into_iter().map(Value::String).collect()),
        );
        parameters.extend(self.fields);
        parameters
    }
}

/// Fold a sequence of portal descriptors in declaration order
pub fn fold_portals(descriptors: &[Value]) -> Result<PortalFold> {
    descriptors
        .iter()
        .enumerate()
        .try_fold(PortalFold::default(), |fold, (index, descriptor)| fold.push(descriptor, index))
}

/// Flatten `data.portals` into a portal name list plus `limit.<portal>`/`offset.<portal>` keys
///
/// A missing or non-sequence `portals` entry yields `{portals: []}`.
pub fn convert_portals(data: &Parameters) -> Result<Parameters> {
    let descriptors: &[Value] = match data.get(PORTALS_KEY) {
        Some(Value::Array(descriptors)) => descriptors,
        _ => &[],
    };
    let fold = fold_portals(descriptors)?;
    log::trace!("folded {} portals: {:?}", fold.names.len(), fold.names);
    Ok(fold.into_parameters())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_convert_portals_basic() {
        let data = params(json!({"portals": [
            {"name": "Orders", "limit": 10},
            {"name": "Items", "offset": 5}
        ]}));
        let result = convert_portals(&data).unwrap();
        assert_eq!(result.get("portals"), Some(&json!(["Orders", "Items"])));
        assert_eq!(result.get("limit.Orders"), Some(&json!(10)));
        assert_eq!(result.get("offset.Items"), Some(&json!(5)));
    }

    #[test]
    fn test_convert_portals_removes_name() {
        let data = params(json!({"portals": [{"name": "Orders", "limit": "3", "offset": "2"}]}));
        let result = convert_portals(&data).unwrap();
        assert_eq!(
            Value::Object(result),
            json!({"portals": ["Orders"], "limit.Orders": "3", "offset.Orders": "2"})
        );
    }

    #[test]
    fn test_convert_portals_passes_other_keys_through() {
        let data = params(json!({"portals": [
            {"name": "A", "layout": "first"},
            {"name": "B", "layout": "second"}
        ]}));
        let result = convert_portals(&data).unwrap();
        assert_eq!(result.get("layout"), Some(&json!("second")));
        assert_eq!(result.get("portals"), Some(&json!(["A", "B"])));
    }

    #[test]
    fn test_convert_portals_absent_or_not_sequence() {
        let empty = json!({"portals": []});
        assert_eq!(Value::Object(convert_portals(&params(json!({}))).unwrap()), empty);
        assert_eq!(
            Value::Object(convert_portals(&params(json!({"portals": "Orders"}))).unwrap()),
            empty
        );
    }

    #[test]
    fn test_fold_portals_keeps_declaration_order() {
        let fold = fold_portals(&[json!({"name": "Z"}), json!({"name": "A"}), json!({"name": "M"})]).unwrap();
        assert_eq!(fold.names, vec!["Z", "A", "M"]);
        assert!(fold.fields.is_empty());
    }

    #[test]
    fn test_fold_portals_rejects_malformed_descriptors() {
        let err = fold_portals(&[json!({"limit": 1})]).unwrap_err();
        assert!(matches!(err, Error::MissingField { .. }));

        let err = fold_portals(&[json!("Orders")]).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { .. }));

        let err = fold_portals(&[json!({"name": 4})]).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { .. }));
    }
}
