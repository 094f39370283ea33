//! Benchmarks for the parameter shaping and response decoding pipeline
//!
//! Copyright (c) 2025 fmdapi contributors
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fmdapi_core::{
    convert_parameters, filter_response, sanitize_parameters, AllowList, Operation, Parameters,
    RequestShaper,
};
use serde_json::{json, Value};

fn create_request(portals: usize) -> Parameters {
    let portal_list: Vec<Value> = (0..portals)
        .map(|i| json!({"name": format!("Portal{}", i), "limit": 10, "offset": i}))
        .collect();
    json!({
        "query": [{"lastName": "==Smith"}],
        "sort": [{"fieldName": "lastName", "sortOrder": "ascend"}],
        "limit": 50,
        "offset": 1,
        "portals": portal_list,
        "scripts": [
            {"name": "Audit", "param": "find"},
            {"name": "Prepare", "phase": "prerequest", "param": {"user": 7}},
            {"name": "Order", "phase": "presort"}
        ]
    })
    .as_object()
    .cloned()
    .unwrap_or_default()
}

fn create_response(records: usize) -> Value {
    let data: Vec<Value> = (0..records)
        .map(|i| {
            json!({
                "fieldData": {"firstName": "Ann", "lastName": "Smith", "index": i},
                "portalData": {},
                "recordId": i.to_string(),
                "modId": "0"
            })
        })
        .collect();
    json!({
        "response": {
            "scriptResult": "{\"audited\":true}",
            "dataInfo": {"foundCount": records},
            "data": data
        },
        "messages": [{"code": "0", "message": "OK"}]
    })
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_parameters");
    for portals in [0, 4, 32] {
        let request = create_request(portals);
        group.bench_with_input(BenchmarkId::from_parameter(portals), &request, |b, request| {
            b.iter(|| convert_parameters(black_box(request)))
        });
    }
    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let request = create_request(8);
    let allowed = Operation::Find.safe_parameters();

    c.bench_function("sanitize_parameters_find", |b| {
        b.iter(|| sanitize_parameters(black_box(&request), Some(&allowed[..])))
    });

    let shaper = RequestShaper::for_operation(Operation::Find);
    c.bench_function("request_shaper_find", |b| b.iter(|| shaper.shape(black_box(&request))));

    let list = AllowList::for_operation(Operation::List);
    c.bench_function("allow_list_match", |b| {
        b.iter(|| list.allows(black_box("_offset.Portal7")))
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_response");
    for records in [1, 50, 500] {
        let response = create_response(records);
        group.bench_with_input(BenchmarkId::from_parameter(records), &response, |b, response| {
            b.iter(|| filter_response(black_box(response)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_assembly, bench_sanitize, bench_decode);
criterion_main!(benches);
