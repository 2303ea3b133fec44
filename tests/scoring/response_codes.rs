use apiscore::Severity;
use apiscore::parsed::ParsedSpecification;
use apiscore::subscorers::{ResponseCodesSubscorer, Subscorer};
use serde_json::json;

use super::common::{assert_close, messages, path, response};

fn ops_path(method: &str, code: &str) -> Vec<String> {
    path(&["paths", "/pets", method, "responses", code])
}

#[test]
fn no_issues() {
    let report = ResponseCodesSubscorer::new(15.0).score(&ParsedSpecification::default());
    assert_close(report.points, 15.0);
    assert!(report.issues.is_empty());
}

#[test]
fn created_without_error_code() {
    let created = response(json!({
        "description": "Created",
        "content": {"application/json": {"schema": {"type": "object"}}}
    }));
    let mut facts = ParsedSpecification::default();
    facts.response_codes.responses = vec![(ops_path("post", "201"), &created)];

    let report = ResponseCodesSubscorer::new(15.0).score(&facts);
    let messages = messages(&report);

    assert_eq!(report.issues.len(), 1);
    assert_eq!(
        messages[0],
        "Missing error response code at: paths -> /pets -> post -> responses"
    );
    assert!(!messages.iter().any(|m| m.contains("success")));
    assert_eq!(report.issues[0].severity, Severity::Medium);
    assert_close(report.points, 15.0 * 0.8);
}

#[test]
fn error_only_operation_misses_success() {
    let not_found = response(json!({"description": "Not found"}));
    let mut facts = ParsedSpecification::default();
    facts.response_codes.responses = vec![(ops_path("get", "404"), &not_found)];

    let report = ResponseCodesSubscorer::new(15.0).score(&facts);

    // 404 may omit content, so only the success code is missing.
    assert_eq!(messages(&report), vec![
        "Missing success response code at: paths -> /pets -> get -> responses"
    ]);
}

#[test]
fn class_keys_cover_their_range() {
    let ok = response(json!({"description": "ok", "content": {"application/json": {}}}));
    let err = response(json!({"description": "err", "content": {"application/json": {}}}));
    let mut facts = ParsedSpecification::default();
    facts.response_codes.responses = vec![
        (ops_path("get", "2XX"), &ok),
        (ops_path("get", "5XX"), &err),
    ];

    let report = ResponseCodesSubscorer::new(15.0).score(&facts);
    assert!(report.issues.is_empty(), "{:?}", report.issues);
}

#[test]
fn server_errors_count_as_error_codes() {
    let ok = response(json!({"description": "ok", "content": {"application/json": {}}}));
    let err = response(json!({"description": "err", "content": {"application/json": {}}}));
    let mut facts = ParsedSpecification::default();
    facts.response_codes.responses = vec![
        (ops_path("get", "200"), &ok),
        (ops_path("get", "503"), &err),
    ];

    let report = ResponseCodesSubscorer::new(15.0).score(&facts);
    assert!(report.issues.is_empty());
}

#[test]
fn default_response_covers_neither_class() {
    let fallback = response(json!({"description": "any", "content": {"application/json": {}}}));
    let mut facts = ParsedSpecification::default();
    facts.response_codes.responses = vec![(ops_path("get", "default"), &fallback)];

    let report = ResponseCodesSubscorer::new(15.0).score(&facts);
    assert_eq!(report.issues.len(), 2);
    assert_close(report.points, 15.0 * 0.8 * 0.8);
}

#[test]
fn empty_content_outside_no_content_codes() {
    let ok = response(json!({"description": "ok"}));
    let no_content = response(json!({"description": "gone"}));
    let bad_request = response(json!({"description": "bad", "content": {}}));
    let conflict = response(json!({"description": "conflict"}));
    let mut facts = ParsedSpecification::default();
    facts.response_codes.responses = vec![
        (ops_path("put", "200"), &ok),
        (ops_path("put", "204"), &no_content),
        (ops_path("put", "400"), &bad_request),
        (ops_path("put", "409"), &conflict),
    ];

    let report = ResponseCodesSubscorer::new(15.0).score(&facts);
    let flagged: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.message.starts_with("Response has no content defined at"))
        .map(|i| i.path.clone().unwrap())
        .collect();

    assert_eq!(flagged, vec![
        "paths -> /pets -> put -> responses -> 200".to_string(),
        "paths -> /pets -> put -> responses -> 409".to_string(),
    ]);
    assert_eq!(report.issues.len(), 2);
    assert_close(report.points, 15.0 * 0.98);
}

#[test]
fn missing_responses_are_low_and_batched() {
    let mut facts = ParsedSpecification::default();
    facts.response_codes.missing_responses = vec![
        path(&["paths", "/a", "get"]),
        path(&["paths", "/b", "get"]),
    ];

    let report = ResponseCodesSubscorer::new(15.0).score(&facts);

    assert_eq!(report.issues.len(), 2);
    assert!(report.issues.iter().all(|i| i.severity == Severity::Low));
    assert_eq!(report.issues[0].message, "Missing responses definition at: paths -> /a -> get");
    assert_close(report.points, 15.0 * 0.98);
}

#[test]
fn operations_are_grouped_separately() {
    let ok = response(json!({"description": "ok", "content": {"application/json": {}}}));
    let err = response(json!({"description": "err", "content": {"application/json": {}}}));
    let mut facts = ParsedSpecification::default();
    facts.response_codes.responses = vec![
        (ops_path("get", "200"), &ok),
        (ops_path("get", "400"), &err),
        (ops_path("delete", "200"), &ok),
    ];

    let report = ResponseCodesSubscorer::new(15.0).score(&facts);

    assert_eq!(report.issues.len(), 1);
    assert_eq!(
        report.issues[0].path.as_deref(),
        Some("paths -> /pets -> delete -> responses")
    );
}
