//! End-to-end tests for outbound parameter shaping
//!
//! These tests run realistic request objects through assembly, sanitizing and
//! wire rendering together.


use fmdapi_core::{
    convert_parameters, namespace, sanitize_parameters, Operation, RequestShaper, WireParameters,
};
use serde_json::{json, Value};
use test_support::{find_request, params};

#[test]
fn test_find_request_assembles_every_wire_key() {
    let assembled = convert_parameters(&find_request()).expect("assembly should succeed");

    assert_eq!(assembled["limit.Orders"], json!(10));
    assert_eq!(assembled["limit.Invoices"], json!(5));
    assert_eq!(assembled["offset.Invoices"], json!(2));
    assert_eq!(assembled["script"], json!("Audit"));
    assert_eq!(assembled["script.param"], json!("find"));
    assert_eq!(assembled["script.prerequest"], json!("Prepare"));
    assert_eq!(assembled["script.prerequest.param"], json!("{\"user\":7}"));
    assert_eq!(assembled["script.presort"], json!("Order"));
    assert_eq!(assembled["limit"], json!(25));
    // Caller keys are layered last, so the descriptor arrays survive.
    assert!(assembled["portals"].is_array());
    assert!(assembled["scripts"].is_array());
}

#[test]
fn test_find_request_sanitized_for_find() {
    let allowed = Operation::Find.safe_parameters();
    let sanitized = sanitize_parameters(&find_request(), Some(&allowed[..])).unwrap();

    assert!(!sanitized.contains_key("scripts"));
    assert_eq!(sanitized["limit"], json!("25"));
    assert_eq!(sanitized["offset"], json!("1"));
    assert_eq!(sanitized["limit.Orders"], json!("10"));
    assert_eq!(sanitized["script.prerequest.param"], json!("{\"user\":7}"));
    assert_eq!(
        sanitized["query"],
        json!([{"lastName": "==Smith"}, {"status": "Closed", "omit": "true"}])
    );
}

#[test]
fn test_sanitized_keys_are_a_subset_of_assembled_keys() {
    let request = find_request();
    let assembled = convert_parameters(&request).unwrap();
    for operation in Operation::ALL {
        let allowed = operation.safe_parameters();
        let sanitized = sanitize_parameters(&request, Some(&allowed[..])).unwrap();
        for key in sanitized.keys() {
            assert!(assembled.contains_key(key), "{} introduced key {}", operation, key);
        }
    }
}

#[test]
fn test_list_request_query_string() {
    let request = params(json!({
        "limit": 5,
        "offset": 10,
        "sort": [{"fieldName": "lastName"}],
        "scripts": [{"name": "Log", "param": "list"}]
    }));
    let wire = RequestShaper::for_operation(Operation::List)
        .shape_wire(&request)
        .unwrap();

    assert_eq!(wire.get("_limit"), Some("5"));
    assert_eq!(wire.get("_sort"), Some("[{\"fieldName\":\"lastName\"}]"));
    assert_eq!(wire.get("script.param"), Some("list"));
    assert!(wire.get("scripts").is_none());

    let query = wire.to_query_string();
    assert!(query.contains("_limit=5"));
    assert!(query.contains("_offset=10"));
    assert!(query.contains("script=Log"));
}

#[test]
fn test_namespace_then_sanitize_with_underscore_wildcards() {
    let request = namespace(&params(json!({"limit": 3, "_limit.Orders": 2, "_offset.Orders": 1})));
    let sanitized = sanitize_parameters(&request, Some(&["_limit.*", "_offset.*"][..])).unwrap();
    assert_eq!(
        Value::Object(sanitized),
        json!({"_limit.Orders": "2", "_offset.Orders": "1"})
    );
}

#[test]
fn test_create_request_keeps_field_data_objects() {
    let request = params(json!({
        "fieldData": {"firstName": "Ann", "age": 31},
        "portalData": {"Orders": [{"Orders::item": "Pen"}]},
        "scripts": [{"name": "Welcome", "param": 1}],
        "layout": "People"
    }));
    let shaped = RequestShaper::for_operation(Operation::Create).shape(&request).unwrap();
    assert_eq!(shaped["fieldData"], json!({"firstName": "Ann", "age": 31}));
    assert_eq!(shaped["script.param"], json!("1"));
    assert!(!shaped.contains_key("layout"));

    let wire = WireParameters::from_parameters(&shaped);
    assert_eq!(wire.get("fieldData"), Some("{\"firstName\":\"Ann\",\"age\":31}"));
}
