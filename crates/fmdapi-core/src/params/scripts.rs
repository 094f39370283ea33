//! Script descriptor flattening
//!
//! A script descriptor `{name, phase?, ...}` becomes dotted wire keys:
//! `script`/`script.<key>` without a phase, `script.<phase>`/
//! `script.<phase>.<key>` with one. Descriptors are merged in declaration
//! order, so a later script replaces an earlier one in the same slot.
//!
//! Copyright (c) 2025 fmdapi contributors
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::types::{Parameters, SCRIPTS_KEY};
use serde_json::{Map, Value};

/// Marker removed from flattened keys once the phase is encoded in the prefix
const PHASE_MARKER: &str = ".phase";

/// Flatten `data.scripts` into `script[.phase][.key]` parameters
///
/// A missing or non-sequence `scripts` entry contributes nothing.
pub fn convert_scripts(data: &Parameters) -> Result<Parameters> {
    let scripts = match data.get(SCRIPTS_KEY) {
        Some(Value::Array(scripts)) => scripts,
        _ => return Ok(Parameters::new()),
    };

    let mut merged = Parameters::new();
    for (index, descriptor) in scripts.iter().enumerate() {
        let flattened = flatten_script(descriptor, index)?;
        log::trace!("script {} flattened into {} keys", index, flattened.len());
        merged.extend(flattened);
    }
    Ok(merged)
}

/// Flatten a single script descriptor
fn flatten_script(descriptor: &Value, index: usize) -> Result<Map<String, Value>> {
    let context = format!("scripts[{}]", index);
    let object = descriptor
        .as_object()
        .ok_or_else(|| Error::invalid_shape("object", descriptor, context.as_str()))?;
    if !object.contains_key("name") {
        return Err(Error::missing_field("name", context));
    }

    let prefix = match phase_of(object) {
        Some(phase) => format!("script.{}", phase),
        None => "script".to_string(),
    };

    Ok(object
        .iter()
        .map(|(key, value)| {
            let wire_key = if key == "name" {
                prefix.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            (wire_key, value.clone())
        })
        .filter(|(wire_key, _)| !wire_key.contains(PHASE_MARKER))
        .collect())
}

/// The descriptor's phase, when it is a non-empty string
///
/// Any other `phase` value is ignored and the script lands in the
/// unphased `script` slot.
fn phase_of(object: &Map<String, Value>) -> Option<&str> {
    match object.get("phase") {
        Some(Value::String(phase)) if !phase.is_empty() => Some(phase),
        _ => None,
    }
}
