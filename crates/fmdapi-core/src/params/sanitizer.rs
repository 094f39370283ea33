//! Outbound parameter sanitizing
//!
//! The sanitizer is the single choke point outbound parameters pass through
//! before transport. It assembles the wire keys, keeps only the keys an
//! allow-list permits and renders residual numbers as strings.
//!
//! Copyright (c) 2025 fmdapi contributors
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::params::assembler::convert_parameters;
use crate::params::coerce::number_to_string;
use crate::types::Parameters;
use serde_json::Value;
use std::fmt;

/// Wildcard sentinels understood by the Data API allow-lists
pub const WILDCARD_SENTINELS: [&str; 4] = ["_offset.*", "_limit.*", "offset.*", "limit.*"];

/// A single compiled allow-list entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AllowRule {
    /// The key must equal the name exactly
    Exact(String),
    /// The key must start with the prefix of a wildcard sentinel
    PrefixWildcard(String),
}

impl AllowRule {
    /// Compile an allow-list entry
    ///
    /// Only the [`WILDCARD_SENTINELS`] match by prefix. Any other entry,
    /// including one that happens to end in `*`, must equal the key exactly.
    pub fn parse(entry: &str) -> Self {
        if WILDCARD_SENTINELS.contains(&entry) {
            if let Some(prefix) = entry.strip_suffix('*') {
                return AllowRule::PrefixWildcard(prefix.to_string());
            }
        }
        AllowRule::Exact(entry.to_string())
    }

    /// Check whether a key is permitted by this rule
    pub fn matches(&self, key: &str) -> bool {
        match self {
            AllowRule::Exact(name) => name == key,
            AllowRule::PrefixWildcard(prefix) => key.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for AllowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowRule::Exact(name) => write!(f, "{}", name),
            AllowRule::PrefixWildcard(prefix) => write!(f, "{}*", prefix),
        }
    }
}

/// An allow-list compiled once from caller-supplied entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    rules: Vec<AllowRule>,
}

impl AllowList {
    /// Compile an allow-list from key names and wildcard sentinels
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        list.extend(entries);
        list
    }

    /// Add more entries to the list
    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let rule = AllowRule::parse(entry.as_ref());
            if !self.rules.contains(&rule) {
                self.rules.push(rule);
            }
        }
    }

    /// Check whether a key is permitted
    pub fn allows(&self, key: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(key))
    }

    /// The compiled rules, in the order they were added
    pub fn rules(&self) -> &[AllowRule] {
        &self.rules
    }

    /// Keep only the permitted keys of `parameters`
    pub fn filter(&self, parameters: Parameters) -> Parameters {
        parameters
            .into_iter()
            .filter(|(key, _)| {
                let allowed = self.allows(key);
                if !allowed {
                    log::debug!("dropping parameter '{}' not in allow-list", key);
                }
                allowed
            })
            .collect()
    }
}

/// Assemble, filter and number-stringify outbound parameters
///
/// Without `safe_parameters` every assembled key is kept.
pub fn sanitize_parameters<S: AsRef<str>>(
    parameters: &Parameters,
    safe_parameters: Option<&[S]>,
) -> Result<Parameters> {
    let allow_list = safe_parameters.map(|entries| AllowList::new(entries.iter()));
    sanitize_with(parameters, allow_list.as_ref())
}

/// Same as [`sanitize_parameters`] with a precompiled allow-list
pub fn sanitize_with(parameters: &Parameters, allow_list: Option<&AllowList>) -> Result<Parameters> {
    let assembled = convert_parameters(parameters)?;
    let retained = match allow_list {
        Some(list) => list.filter(assembled),
        None => assembled,
    };
    Ok(retained
        .into_iter()
        .map(|(key, value)| match value {
            Value::Number(number) => (key, Value::String(number_to_string(&number))),
            other => (key, other),
        })
        .collect())
}
