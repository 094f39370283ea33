//! Control key namespacing
//!
//! Query-string requests reserve the bare `limit`, `offset` and `sort` names
//! for field queries, so the pagination controls travel as `_limit`,
//! `_offset` and `_sort`.

use crate::types::Parameters;

/// Control keys and their namespaced wire names
const CONTROL_KEYS: [(&str, &str); 3] = [
    ("limit", "_limit"),
    ("offset", "_offset"),
    ("sort", "_sort"),
];

/// Rename top-level `limit`/`offset`/`sort` to `_limit`/`_offset`/`_sort`
pub fn namespace(data: &Parameters) -> Parameters {
    data.iter()
        .map(|(key, value)| (namespaced_key(key).to_string(), value.clone()))
        .collect()
}

fn namespaced_key(key: &str) -> &str {
    CONTROL_KEYS
        .iter()
        .find(|(bare, _)| *bare == key)
        .map(|(_, namespaced)| *namespaced)
        .unwrap_or(key)
}
