//! Request and response façades
//!
//! `RequestShaper` bundles the outbound steps (namespacing, assembly,
//! allow-list filtering) for one operation; `ResponseDecoder` bundles the
//! inbound ones (envelope check, JSON decoding, record flattening).
//!
//! Copyright (c) 2025 fmdapi contributors
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::params::namespace::namespace;
use crate::params::presets::Operation;
use crate::params::sanitizer::{sanitize_with, AllowList};
use crate::response::envelope::Envelope;
use crate::response::records::{field_data, record_id};
use crate::types::Parameters;
use crate::wire::WireParameters;
use serde_json::Value;

/// Shapes application parameters for a Data API request
#[derive(Debug, Clone, Default)]
pub struct RequestShaper {
    operation: Option<Operation>,
    allow_list: Option<AllowList>,
    namespace: Option<bool>,
}

impl RequestShaper {
    /// A shaper that keeps every assembled key
    pub fn new() -> Self {
        Self::default()
    }

    /// A shaper that filters through the operation's preset allow-list
    pub fn for_operation(operation: Operation) -> Self {
        Self {
            operation: Some(operation),
            allow_list: Some(operation.allow_list()),
            namespace: None,
        }
    }

    /// Permit additional keys or wildcard sentinels
    pub fn allow<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allow_list.get_or_insert_with(AllowList::default).extend(entries);
        self
    }

    /// Force control-key namespacing on or off, overriding the operation default
    pub fn namespace_control_keys(mut self, enabled: bool) -> Self {
        self.namespace = Some(enabled);
        self
    }

    /// Drop the allow-list, keeping every assembled key
    pub fn unfiltered(mut self) -> Self {
        self.allow_list = None;
        self
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn allow_list(&self) -> Option<&AllowList> {
        self.allow_list.as_ref()
    }

    fn namespaces(&self) -> bool {
        self.namespace
            .unwrap_or_else(|| self.operation.is_some_and(Operation::namespaces_control_keys))
    }

    /// Shape parameters: namespace if required, then assemble and filter
    pub fn shape(&self, parameters: &Parameters) -> Result<Parameters> {
        let shaped = if self.namespaces() {
            sanitize_with(&namespace(parameters), self.allow_list.as_ref())?
        } else {
            sanitize_with(parameters, self.allow_list.as_ref())?
        };
        log::debug!(
            "shaped {} of {} parameters for {}",
            shaped.len(),
            parameters.len(),
            self.operation.map(Operation::as_str).unwrap_or("unfiltered request")
        );
        Ok(shaped)
    }

    /// Shape parameters from an arbitrary JSON value, which must be an object
    pub fn shape_value(&self, value: &Value) -> Result<Parameters> {
        let parameters = value
            .as_object()
            .ok_or_else(|| Error::invalid_shape("object", value, "request parameters"))?;
        self.shape(parameters)
    }

    /// Shape parameters and render every value as a string
    pub fn shape_wire(&self, parameters: &Parameters) -> Result<WireParameters> {
        Ok(WireParameters::from_parameters(&self.shape(parameters)?))
    }
}

/// Decodes Data API response envelopes
#[derive(Debug, Clone)]
pub struct ResponseDecoder {
    check_messages: bool,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self { check_messages: true }
    }
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the envelope message check, decoding error replies as well
    pub fn skip_message_check(mut self) -> Self {
        self.check_messages = false;
        self
    }

    /// Check the envelope messages and decode the response payload
    pub fn decode(&self, envelope: &Value) -> Result<Parameters> {
        let envelope = Envelope::from_value(envelope)?;
        if self.check_messages {
            envelope.check()?;
        }
        envelope.decode()
    }

    /// Decode the envelope and flatten the records under `response.data`
    pub fn records(&self, envelope: &Value) -> Result<Value> {
        field_data(&self.data(envelope)?)
    }

    /// Decode the envelope and collect the record ids under `response.data`
    pub fn record_ids(&self, envelope: &Value) -> Result<Value> {
        record_id(&self.data(envelope)?)
    }

    fn data(&self, envelope: &Value) -> Result<Value> {
        let mut decoded = self.decode(envelope)?;
        decoded
            .remove("data")
            .ok_or_else(|| Error::missing_field("data", "decoded response"))
    }
}
