//! fmdapi Core - Shaping engine for the FileMaker Data API
//!
//! This crate translates between an application's natural query and record
//! objects and the flat, string-typed, dot/underscore-prefixed parameter
//! convention the FileMaker Data API expects, and decodes the API's response
//! envelopes back into record-shaped objects.
//!
//! # Main Components
//!
//! - **Parameter shaping** ([`params`]): control key namespacing, portal and
//!   script flattening, value coercion and allow-list sanitizing
//! - **Response decoding** ([`response`]): envelope unwrapping, nested JSON
//!   decoding and record extraction
//! - **Wire form** ([`wire`]): all-string parameters and query-string rendering
//! - **Façades** ([`shaper`]): per-operation request shaping and response decoding
//!
//! # Example
//!
//! ```
//! use fmdapi_core::{sanitize_parameters, filter_response, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let query = json!({
//!         "limit": 10,
//!         "portals": [{"name": "Orders", "limit": 5}],
//!         "scripts": [{"name": "Audit", "phase": "prerequest", "param": {"user": 1}}]
//!     });
//!     let parameters = sanitize_parameters(
//!         query.as_object().expect("object literal"),
//!         Some(&["limit", "limit.*", "script.prerequest", "script.prerequest.param"][..]),
//!     )?;
//!     assert_eq!(parameters["limit.Orders"], json!("5"));
//!     assert_eq!(parameters["script.prerequest.param"], json!("{\"user\":1}"));
//!
//!     let decoded = filter_response(&json!({"response": {"scriptResult": "{\"ok\":true}"}}))?;
//!     assert_eq!(decoded["scriptResult"], json!({"ok": true}));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod json;
pub mod params;
pub mod response;
pub mod shaper;
pub mod types;
pub mod util;
pub mod wire;

// Re-export main types for convenience
pub use error::{Error, JsonKind, Result};
pub use json::{is_json, is_json_str};
pub use params::{
    convert_parameters, convert_portals, convert_scripts, fold_portals, namespace,
    number_to_string, sanitize_parameters, sanitize_with, stringify, AllowList, AllowRule,
    FieldValue, Operation, PortalFold, WILDCARD_SENTINELS,
};
pub use response::{field_data, filter_response, record_id, DapiMessage, Envelope};
pub use shaper::{RequestShaper, ResponseDecoder};
pub use types::{Parameters, PortalDescriptor, Record, ScriptDescriptor};
#[allow(deprecated)]
pub use util::omit;
pub use util::to_array;
pub use wire::WireParameters;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::missing_field("recordId", "record");
        assert!(err.to_string().contains("recordId"));
    }
}
