//! Core types for the fmdapi shaping pipeline
//!
//! Parameters travel through the pipeline as insertion-ordered JSON maps so
//! that caller-defined fields, control keys and derived wire keys can share a
//! single namespace. The descriptor and record types give Rust callers a typed
//! way to build and read those maps.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat parameter mapping (field name to value)
pub type Parameters = Map<String, Value>;

/// Key holding the portal descriptor sequence in a query
pub const PORTALS_KEY: &str = "portals";

/// Key holding the script descriptor sequence in a query
pub const SCRIPTS_KEY: &str = "scripts";

/// A related-table occurrence referenced by a query
///
/// `name` identifies the portal on the wire; `limit` and `offset` become
/// `limit.<name>` and `offset.<name>`. Any other fields are carried through
/// to the flattened parameters unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PortalDescriptor {
    /// Create a descriptor for the named portal
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            limit: None,
            offset: None,
            extra: Map::new(),
        }
    }

    /// Set the number of related records to return
    pub fn limit(mut self, limit: impl Into<Value>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Set the first related record to return
    pub fn offset(mut self, offset: impl Into<Value>) -> Self {
        self.offset = Some(offset.into());
        self
    }
}

/// A server-side script to run as part of a request
///
/// Without a phase the script runs after the request (`script`, `script.param`).
/// A phase such as `prerequest` or `presort` moves it to `script.<phase>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScriptDescriptor {
    /// Create a descriptor for the named script
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phase: None,
            param: None,
            extra: Map::new(),
        }
    }

    /// Run the script in the given phase
    pub fn phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    /// Pass a parameter to the script
    pub fn param(mut self, param: impl Into<Value>) -> Self {
        self.param = Some(param.into());
        self
    }
}

impl From<PortalDescriptor> for Value {
    fn from(descriptor: PortalDescriptor) -> Self {
        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(descriptor.name));
        if let Some(limit) = descriptor.limit {
            object.insert("limit".to_string(), limit);
        }
        if let Some(offset) = descriptor.offset {
            object.insert("offset".to_string(), offset);
        }
        object.extend(descriptor.extra);
        Value::Object(object)
    }
}

impl From<ScriptDescriptor> for Value {
    fn from(descriptor: ScriptDescriptor) -> Self {
        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(descriptor.name));
        if let Some(phase) = descriptor.phase {
            object.insert("phase".to_string(), Value::String(phase));
        }
        if let Some(param) = descriptor.param {
            object.insert("param".to_string(), param);
        }
        object.extend(descriptor.extra);
        Value::Object(object)
    }
}

/// A single record as returned by the Data API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "fieldData")]
    pub field_data: Map<String, Value>,
    #[serde(rename = "portalData", default, skip_serializing_if = "Option::is_none")]
    pub portal_data: Option<Map<String, Value>>,
    #[serde(rename = "recordId")]
    pub record_id: Value,
    #[serde(rename = "modId")]
    pub mod_id: Value,
}

impl Record {
    /// Read a record out of a JSON value, reporting the first missing field
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::invalid_shape("object", value, "record"))?;

        let field_data = match object.get("fieldData") {
            Some(Value::Object(fields)) => fields.clone(),
            Some(other) => return Err(Error::invalid_shape("object", other, "record fieldData")),
            None => return Err(Error::missing_field("fieldData", "record")),
        };
        let portal_data = match object.get("portalData") {
            Some(Value::Object(portals)) => Some(portals.clone()),
            _ => None,
        };
        let record_id = object
            .get("recordId")
            .cloned()
            .ok_or_else(|| Error::missing_field("recordId", "record"))?;
        let mod_id = object
            .get("modId")
            .cloned()
            .ok_or_else(|| Error::missing_field("modId", "record"))?;

        Ok(Self {
            field_data,
            portal_data,
            record_id,
            mod_id,
        })
    }

    /// Flatten into `{...fieldData, recordId, modId}`
    ///
    /// `recordId` and `modId` overwrite same-named entries in `fieldData`.
    pub fn into_flat(self) -> Map<String, Value> {
        let mut flat = self.field_data;
        flat.insert("recordId".to_string(), self.record_id);
        flat.insert("modId".to_string(), self.mod_id);
        flat
    }
}
