use apiscore::Severity;
use apiscore::parsed::ParsedSpecification;
use apiscore::subscorers::{SecuritySubscorer, Subscorer, missing_fields};
use serde_json::json;

use super::common::{assert_close, issues_with, named, path, scheme};

fn scheme_path(name: &str) -> Vec<String> {
    path(&["components", "securitySchemes", name])
}

#[test]
fn no_schemes_is_critical() {
    let report = SecuritySubscorer::new(10.0).score(&ParsedSpecification::default());

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].severity, Severity::Critical);
    assert_eq!(report.issues[0].message, "Security schemes are not defined");
    assert_close(report.points, 3.0);
}

#[test]
fn undefined_references_are_ignored_without_schemes() {
    let mut facts = ParsedSpecification::default();
    facts.security.referenced_schemes = vec![named("ghost", &["security", "0", "ghost"])];

    let report = SecuritySubscorer::new(10.0).score(&facts);
    assert_eq!(report.issues.len(), 1);
}

#[test]
fn complete_and_referenced_scheme_keeps_full_points() {
    let bearer = scheme(json!({"type": "http", "scheme": "bearer"}));
    let mut facts = ParsedSpecification::default();
    facts.security.schemes = vec![(scheme_path("bearer"), &bearer)];
    facts.security.defined_schemes = vec![named("bearer", &["components", "securitySchemes", "bearer"])];
    facts.security.referenced_schemes = vec![named("bearer", &["security", "0", "bearer"])];

    let report = SecuritySubscorer::new(10.0).score(&facts);
    assert!(report.issues.is_empty(), "{:?}", report.issues);
    assert_close(report.points, 10.0);
}

#[test]
fn defined_but_unreferenced() {
    let key = scheme(json!({"type": "apiKey", "name": "X-Key", "in": "header"}));
    let mut facts = ParsedSpecification::default();
    facts.security.schemes = vec![(scheme_path("apiKey"), &key)];
    facts.security.defined_schemes = vec![named("apiKey", &["components", "securitySchemes", "apiKey"])];

    let report = SecuritySubscorer::new(10.0).score(&facts);

    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.severity, Severity::High);
    assert_eq!(issue.message, "Security scheme 'apiKey' is defined, but not referenced");
    assert!(!issue.message.contains("missing"));
    assert_eq!(issue.path.as_deref(), Some("components -> securitySchemes -> apiKey"));
    assert_close(report.points, 6.0);
}

#[test]
fn operation_references_count() {
    let key = scheme(json!({"type": "apiKey", "name": "X-Key", "in": "header"}));
    let mut facts = ParsedSpecification::default();
    facts.security.schemes = vec![(scheme_path("key"), &key)];
    facts.security.defined_schemes = vec![named("key", &["components", "securitySchemes", "key"])];
    facts.security.operation_referenced_schemes =
        vec![named("key", &["paths", "/pets", "get", "security", "0", "key"])];

    let report = SecuritySubscorer::new(10.0).score(&facts);
    assert!(report.issues.is_empty());
}

#[test]
fn referenced_but_undefined() {
    let key = scheme(json!({"type": "apiKey", "name": "X-Key", "in": "header"}));
    let mut facts = ParsedSpecification::default();
    facts.security.schemes = vec![(scheme_path("key"), &key)];
    facts.security.defined_schemes = vec![named("key", &["components", "securitySchemes", "key"])];
    facts.security.referenced_schemes = vec![
        named("key", &["security", "0", "key"]),
        named("oauth", &["security", "1", "oauth"]),
    ];

    let report = SecuritySubscorer::new(10.0).score(&facts);

    let medium = issues_with(&report, Severity::Medium);
    assert_eq!(medium.len(), 1);
    assert_eq!(medium[0].message, "Security scheme 'oauth' is referenced, but not defined");
    assert_eq!(medium[0].path.as_deref(), Some("security -> 1 -> oauth"));
    assert!(!medium[0].message.contains("missing"));
    assert_close(report.points, 8.0);
}

#[test]
fn oauth2_flow_without_scopes_zeroes_the_category() {
    let oauth = scheme(json!({
        "type": "oauth2",
        "flows": {"clientCredentials": {"tokenUrl": "https://auth.example.com/token"}}
    }));
    let mut facts = ParsedSpecification::default();
    facts.security.schemes = vec![(scheme_path("oauth"), &oauth)];
    facts.security.defined_schemes = vec![named("oauth", &["components", "securitySchemes", "oauth"])];
    facts.security.referenced_schemes = vec![named("oauth", &["security", "0", "oauth"])];

    let report = SecuritySubscorer::new(10.0).score(&facts);

    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.severity, Severity::Zero);
    assert!(issue.message.contains("missing"));
    assert!(issue.message.contains("oauth2"));
    assert!(issue.message.ends_with("scopes"), "{}", issue.message);
    assert_eq!(
        issue.path.as_deref(),
        Some("components -> securitySchemes -> oauth -> flows -> clientCredentials")
    );
    assert_close(report.points, 0.0);
}

#[test]
fn missing_fields_groups_scheme_then_flows() {
    let oauth = scheme(json!({
        "type": "oauth2",
        "flows": {
            "implicit": {"scopes": {"read": "Read access"}},
            "authorizationCode": {"authorizationUrl": "https://a", "tokenUrl": "https://t", "scopes": {}}
        }
    }));

    let groups = missing_fields(&scheme_path("oauth"), &oauth);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].path.last().map(String::as_str), Some("implicit"));
    assert_eq!(groups[0].fields, vec!["authorizationUrl"]);
    assert_eq!(groups[1].path.last().map(String::as_str), Some("authorizationCode"));
    assert_eq!(groups[1].fields, vec!["scopes"]);
}

#[test]
fn missing_fields_for_plain_schemes() {
    let key = scheme(json!({"type": "apiKey", "name": ""}));
    let http = scheme(json!({"type": "http"}));
    let oidc = scheme(json!({"type": "openIdConnect", "openIdConnectUrl": "https://id"}));
    let oauth = scheme(json!({"type": "oauth2"}));

    assert_eq!(missing_fields(&scheme_path("k"), &key)[0].fields, vec!["name", "in"]);
    assert_eq!(missing_fields(&scheme_path("h"), &http)[0].fields, vec!["scheme"]);
    assert!(missing_fields(&scheme_path("o"), &oidc).is_empty());
    assert_eq!(missing_fields(&scheme_path("o"), &oauth)[0].fields, vec!["flows"]);
}

#[test]
fn oauth2_with_empty_flows_lists_every_flow() {
    let oauth = scheme(json!({"type": "oauth2", "flows": {}}));

    let groups = missing_fields(&scheme_path("oauth"), &oauth);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].fields, vec![
        "implicit",
        "password",
        "clientCredentials",
        "authorizationCode",
    ]);
}
