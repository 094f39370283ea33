//! All-string wire parameters
//!
//! Sanitized parameters may still hold composite values (a caller-supplied
//! `query` array, a `portals` list). `WireParameters` is the final form handed
//! to a transport: every value rendered to a string, ready to be sent as a
//! query string or a flat JSON body.

use crate::params::coerce::stringify;
use crate::types::Parameters;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// A flat, insertion-ordered mapping of wire key to string value
///
/// Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireParameters {
    pairs: Vec<(String, String)>,
}

impl WireParameters {
    /// Render parameters to strings through the type coercer
    pub fn from_parameters(parameters: &Parameters) -> Self {
        let pairs = stringify(parameters)
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(text) => (key, text),
                other => (key, other.to_string()),
            })
            .collect();
        Self { pairs }
    }

    /// Look up the value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Render as an `application/x-www-form-urlencoded` query string
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Consume into a sorted map, for transports that want one
    pub fn into_sorted(self) -> BTreeMap<String, String> {
        self.pairs.into_iter().collect()
    }

    /// Consume into the underlying pairs
    pub fn into_inner(self) -> Vec<(String, String)> {
        self.pairs
    }
}

impl From<&Parameters> for WireParameters {
    fn from(parameters: &Parameters) -> Self {
        Self::from_parameters(parameters)
    }
}

impl Serialize for WireParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for WireParameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parameters = Parameters::deserialize(deserializer)?;
        Ok(Self::from_parameters(&parameters))
    }
}
