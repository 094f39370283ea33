//! Response envelope filtering

use crate::error::{Error, Result};
use crate::json::{decode_json_value, is_json};
use crate::types::Parameters;
use serde_json::Value;

/// Key holding the payload inside a Data API envelope
pub const RESPONSE_KEY: &str = "response";

/// Unwrap `data.response`, decoding every value that is itself JSON
///
/// String values that parse as JSON are replaced by the parsed value, so a
/// numeric string such as `"1"` becomes the number `1`. Everything else is
/// returned as received.
pub fn filter_response(data: &Value) -> Result<Parameters> {
    let response = data
        .get(RESPONSE_KEY)
        .ok_or_else(|| Error::missing_field(RESPONSE_KEY, "response envelope"))?;
    let fields = response
        .as_object()
        .ok_or_else(|| Error::invalid_shape("object", response, "response envelope"))?;

    Ok(fields
        .iter()
        .map(|(key, value)| {
            let decoded = if is_json(value) {
                decode_json_value(value)
            } else {
                value.clone()
            };
            if value.is_string() && decoded != *value {
                log::trace!("decoded JSON string in response field '{}'", key);
            }
            (key.clone(), decoded)
        })
        .collect())
}
