#![allow(dead_code)]

use apiscore::parsed::{NamedRef, Path};
use apiscore::report::ScoringReport;
use apiscore::types::{RequestBody, Response, SecurityScheme, Server};
use apiscore::{Issue, Severity};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Build a path from string segments.
pub fn path(segments: &[&str]) -> Path {
    segments.iter().map(|s| s.to_string()).collect()
}

pub fn named(name: &str, segments: &[&str]) -> NamedRef {
    NamedRef::new(name, path(segments))
}

/// Deserialize a model type from a JSON literal.
pub fn from_json<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture should deserialize")
}

pub fn response(value: Value) -> Response {
    from_json(value)
}

pub fn request_body(value: Value) -> RequestBody {
    from_json(value)
}

pub fn scheme(value: Value) -> SecurityScheme {
    from_json(value)
}

pub fn server(url: &str) -> Server {
    Server {
        url: url.to_string(),
        ..Server::default()
    }
}

pub fn issues_with(report: &ScoringReport, severity: Severity) -> Vec<&Issue> {
    report
        .issues
        .iter()
        .filter(|i| i.severity == severity)
        .collect()
}

pub fn messages(report: &ScoringReport) -> Vec<&str> {
    report.issues.iter().map(|i| i.message.as_str()).collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
