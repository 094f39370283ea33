//! Record extraction
//!
//! The Data API returns records as `{fieldData, portalData, recordId, modId}`.
//! Applications usually want the fields with the record metadata alongside.

use crate::error::{Error, Result};
use crate::params::coerce::FieldValue;
use crate::types::Record;
use serde_json::Value;

/// Flatten one record or a batch into `{...fieldData, recordId, modId}`
///
/// A batch keeps its order; a single record is returned unwrapped.
pub fn field_data(data: &Value) -> Result<Value> {
    match data {
        Value::Array(records) => records
            .iter()
            .map(flatten_record)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(_) => flatten_record(data),
        other => Err(Error::invalid_shape("record or array of records", other, "field data")),
    }
}

/// Extract record ids
///
/// A batch yields the raw `recordId` of each record with its type preserved;
/// a single record yields its `recordId` as a string.
pub fn record_id(data: &Value) -> Result<Value> {
    match data {
        Value::Array(records) => records
            .iter()
            .map(|record| raw_record_id(record).cloned())
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(_) => {
            let id = raw_record_id(data)?;
            Ok(Value::String(FieldValue::classify(id).to_wire_string()))
        }
        other => Err(Error::invalid_shape("record or array of records", other, "record id")),
    }
}

fn flatten_record(record: &Value) -> Result<Value> {
    Ok(Value::Object(Record::from_value(record)?.into_flat()))
}

fn raw_record_id(record: &Value) -> Result<&Value> {
    let object = record
        .as_object()
        .ok_or_else(|| Error::invalid_shape("object", record, "record"))?;
    object
        .get("recordId")
        .ok_or_else(|| Error::missing_field("recordId", "record"))
}
