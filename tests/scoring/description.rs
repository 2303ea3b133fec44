use apiscore::Severity;
use apiscore::parsed::ParsedSpecification;
use apiscore::subscorers::{DESCRIPTION_CATEGORY, DescriptionSubscorer, Subscorer};

use super::common::{assert_close, path};

#[test]
fn no_issues() {
    let facts = ParsedSpecification::default();
    let report = DescriptionSubscorer::new(20.0).score(&facts);

    assert_eq!(report.category, DESCRIPTION_CATEGORY);
    assert_close(report.points, 20.0);
    assert_eq!(report.max_points, 20.0);
    assert!(report.issues.is_empty());
}

#[test]
fn missing_description_reports_joined_path() {
    let mut facts = ParsedSpecification::default();
    facts.descriptions.missing_descriptions = vec![path(&["a", "b", "c"])];

    let report = DescriptionSubscorer::new(20.0).score(&facts);

    assert!(report.points < 20.0);
    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.severity, Severity::Low);
    assert_eq!(issue.path.as_deref(), Some("a -> b -> c"));
    assert_eq!(issue.message, "Missing description at: a -> b -> c");
}

#[test]
fn short_descriptions_mention_minimum_length() {
    let mut facts = ParsedSpecification::default();
    facts.descriptions.short_descriptions = vec![path(&["paths", "/pets", "get"])];

    let report = DescriptionSubscorer::new(20.0).score(&facts);

    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert!(issue.message.starts_with("Description too short at"));
    assert!(issue.suggestion.as_deref().unwrap().contains("15"));
}

#[test]
fn each_list_is_charged_once() {
    let mut facts = ParsedSpecification::default();
    facts.descriptions.missing_descriptions = vec![
        path(&["paths", "/a", "get"]),
        path(&["paths", "/b", "get"]),
        path(&["paths", "/c", "get"]),
    ];
    facts.descriptions.short_descriptions = vec![
        path(&["paths", "/a", "post"]),
        path(&["paths", "/b", "post"]),
    ];

    let report = DescriptionSubscorer::new(20.0).score(&facts);

    assert_eq!(report.issues.len(), 5);
    assert_close(report.points, 20.0 * 0.98 * 0.98);
}

#[test]
fn missing_issues_precede_short_issues() {
    let mut facts = ParsedSpecification::default();
    facts.descriptions.short_descriptions = vec![path(&["x"])];
    facts.descriptions.missing_descriptions = vec![path(&["y"])];

    let report = DescriptionSubscorer::new(20.0).score(&facts);

    assert!(report.issues[0].message.starts_with("Missing description"));
    assert!(report.issues[1].message.starts_with("Description too short"));
}
