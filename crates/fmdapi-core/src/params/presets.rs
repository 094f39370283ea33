//! Per-operation allow-list presets
//!
//! Each Data API operation accepts a fixed set of parameter keys. These
//! presets let callers sanitize against the right set without spelling it
//! out at every call site.

use crate::error::{Error, Result};
use crate::params::sanitizer::AllowList;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Script keys accepted by every operation
const SCRIPT_KEYS: &[&str] = &[
    "script",
    "script.param",
    "script.prerequest",
    "script.prerequest.param",
    "script.presort",
    "script.presort.param",
];

const CREATE_KEYS: &[&str] = &["fieldData", "portalData"];

const EDIT_KEYS: &[&str] = &["fieldData", "portalData", "modId"];

const GET_KEYS: &[&str] = &[
    "portals",
    "layout.response",
    "limit.*",
    "offset.*",
    "_limit.*",
    "_offset.*",
];

const LIST_KEYS: &[&str] = &["_limit", "_offset", "_sort"];

const FIND_KEYS: &[&str] = &[
    "query",
    "sort",
    "limit",
    "offset",
    "portals",
    "layout.response",
    "limit.*",
    "offset.*",
];

/// A Data API record operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Edit,
    Get,
    List,
    Find,
    Delete,
}

impl Operation {
    /// All operations, in declaration order
    pub const ALL: [Operation; 6] = [
        Operation::Create,
        Operation::Edit,
        Operation::Get,
        Operation::List,
        Operation::Find,
        Operation::Delete,
    ];

    /// The parameter keys and wildcard sentinels this operation accepts
    pub fn safe_parameters(self) -> Vec<&'static str> {
        let specific: &[&[&str]] = match self {
            Operation::Create => &[CREATE_KEYS],
            Operation::Edit => &[EDIT_KEYS],
            Operation::Get => &[GET_KEYS],
            Operation::List => &[GET_KEYS, LIST_KEYS],
            Operation::Find => &[FIND_KEYS],
            Operation::Delete => &[],
        };
        specific
            .iter()
            .flat_map(|keys| keys.iter().copied())
            .chain(SCRIPT_KEYS.iter().copied())
            .collect()
    }

    /// Whether parameters travel in a query string, where bare control keys are namespaced
    pub fn namespaces_control_keys(self) -> bool {
        matches!(self, Operation::Get | Operation::List)
    }

    /// The compiled allow-list for this operation
    pub fn allow_list(self) -> AllowList {
        AllowList::new(self.safe_parameters())
    }

    /// Lowercase operation name
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Edit => "edit",
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Find => "find",
            Operation::Delete => "delete",
        }
    }
}

impl AllowList {
    /// The preset allow-list for an operation
    pub fn for_operation(operation: Operation) -> Self {
        operation.allow_list()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .iter()
            .copied()
            .find(|operation| operation.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::configuration(format!(
                    "unknown operation '{}', expected one of: create, edit, get, list, find, delete",
                    s
                ))
            })
    }
}
