//! Typed Data API response envelope
//!
//! Every Data API reply has the shape `{response: {...}, messages: [...]}`.
//! A message code of `"0"` means success; anything else names the failure.

use crate::error::{Error, Result};
use crate::response::filter::filter_response;
use crate::types::Parameters;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Message code reported on success
pub const SUCCESS_CODE: &str = "0";

/// A single entry of the envelope's `messages` sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DapiMessage {
    #[serde(deserialize_with = "code_as_string")]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl DapiMessage {
    /// Whether this message reports success
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// A Data API response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub response: Value,
    #[serde(default)]
    pub messages: Vec<DapiMessage>,
}

impl Envelope {
    /// Read an envelope from a JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::invalid_shape("object", value, "response envelope"));
        }
        Ok(Envelope::deserialize(value)?)
    }

    /// Fail with the first non-success message, if any
    pub fn check(&self) -> Result<()> {
        match self.messages.iter().find(|message| !message.is_success()) {
            Some(message) => {
                log::warn!("Data API reported error {}: {}", message.code, message.message);
                Err(Error::Api {
                    code: message.code.clone(),
                    message: message.message.clone(),
                })
            }
            None => Ok(()),
        }
    }

    /// Decode the `response` payload, JSON-parsing string values
    pub fn decode(&self) -> Result<Parameters> {
        let mut wrapped = serde_json::Map::new();
        wrapped.insert("response".to_string(), self.response.clone());
        filter_response(&Value::Object(wrapped))
    }
}

/// The Data API sends codes as strings; some proxies rewrite them as numbers
fn code_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(code) => Ok(code),
        Value::Number(code) => Ok(code.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "message code must be a string or number, got {}",
            other
        ))),
    }
}
