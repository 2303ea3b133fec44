use apiscore::Severity;
use apiscore::parsed::ParsedSpecification;
use apiscore::subscorers::{SCHEMA_CATEGORY, SchemaSubscorer, Subscorer};

use super::common::{assert_close, path};

#[test]
fn no_issues() {
    let report = SchemaSubscorer::new(20.0).score(&ParsedSpecification::default());

    assert_eq!(report.category, SCHEMA_CATEGORY);
    assert_close(report.points, 20.0);
    assert!(report.issues.is_empty());
}

#[test]
fn free_form_schemas_are_medium() {
    let mut facts = ParsedSpecification::default();
    facts.schemas.free_form_schemas = vec![
        path(&["components", "schemas", "Anything"]),
        path(&["components", "schemas", "Bag"]),
    ];

    let report = SchemaSubscorer::new(20.0).score(&facts);

    assert_eq!(report.issues.len(), 2);
    assert!(report.issues.iter().all(|i| i.severity == Severity::Medium));
    assert_eq!(
        report.issues[0].message,
        "Free-form schema found at: components -> schemas -> Anything"
    );
    assert_close(report.points, 20.0 * 0.8);
}

#[test]
fn missing_schemas_are_high() {
    let mut facts = ParsedSpecification::default();
    facts.schemas.missing_schemas = vec![path(&[
        "paths",
        "/pets",
        "get",
        "responses",
        "200",
        "content",
        "application/json",
    ])];

    let report = SchemaSubscorer::new(20.0).score(&facts);

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].severity, Severity::High);
    assert!(report.issues[0].message.starts_with("Missing schema in media type at"));
    assert_close(report.points, 20.0 * 0.6);
}

#[test]
fn both_rules_multiply() {
    let mut facts = ParsedSpecification::default();
    facts.schemas.free_form_schemas = vec![path(&["a"])];
    facts.schemas.missing_schemas = vec![path(&["b"]), path(&["c"])];

    let report = SchemaSubscorer::new(20.0).score(&facts);

    assert_eq!(report.issues.len(), 3);
    assert_close(report.points, 20.0 * 0.8 * 0.6);
}
