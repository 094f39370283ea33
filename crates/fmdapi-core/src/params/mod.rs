//! Outbound parameter shaping
//!
//! This module turns an application's query or record object into the flat,
//! string-valued parameter set the Data API expects: control keys are
//! namespaced, portal and script descriptors are flattened into dotted keys,
//! and the result is filtered through an allow-list before transport.
//!
//! Copyright (c) 2025 fmdapi contributors
//! Licensed under the Apache-2.0 license

pub mod assembler;
pub mod coerce;
pub mod namespace;
pub mod portals;
pub mod presets;
pub mod sanitizer;
pub mod scripts;

pub use assembler::convert_parameters;
pub use coerce::{number_to_string, stringify, FieldValue};
pub use namespace::namespace;
pub use portals::{convert_portals, fold_portals, PortalFold};
pub use presets::Operation;
pub use sanitizer::{sanitize_parameters, sanitize_with, AllowList, AllowRule, WILDCARD_SENTINELS};
pub use scripts::convert_scripts;
