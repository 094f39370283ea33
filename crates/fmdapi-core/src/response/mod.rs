//! Inbound response decoding
//!
//! This module unwraps Data API response envelopes, decodes field values that
//! arrive as JSON-encoded strings and reshapes records into flat objects.
//!
//! Copyright (c) 2025 fmdapi contributors
//! Licensed under the Apache-2.0 license

pub mod envelope;
pub mod filter;
pub mod records;

pub use envelope::{DapiMessage, Envelope};
pub use filter::filter_response;
pub use records::{field_data, record_id};
