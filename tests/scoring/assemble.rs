use apiscore::report::ScoringReport;
use apiscore::{Grade, Issue, Severity, assemble};

use super::common::assert_close;

fn report(category: &str, points: f64, max: f64, severities: &[Severity]) -> ScoringReport {
    let mut report = ScoringReport::new(category, max);
    report.points = points;
    report.issues = severities
        .iter()
        .map(|s| Issue::new(*s, format!("{} issue", s)))
        .collect();
    report
}

#[test]
fn totals_are_rounded_to_one_decimal() {
    let final_report = assemble(vec![
        report("a", 19.604, 20.0, &[]),
        report("b", 9.8, 10.0, &[]),
    ]);

    assert_close(final_report.total_score, 29.4);
    assert_close(final_report.max_total_score, 30.0);
}

#[test]
fn histogram_has_every_severity() {
    let final_report = assemble(vec![
        report("a", 10.0, 20.0, &[Severity::Low, Severity::Low, Severity::High]),
        report("b", 0.0, 10.0, &[Severity::Zero]),
    ]);

    assert_eq!(final_report.severity_counts.len(), 5);
    assert_eq!(final_report.severity_counts[&Severity::Low], 2);
    assert_eq!(final_report.severity_counts[&Severity::Medium], 0);
    assert_eq!(final_report.severity_counts[&Severity::High], 1);
    assert_eq!(final_report.severity_counts[&Severity::Critical], 0);
    assert_eq!(final_report.severity_counts[&Severity::Zero], 1);
    assert_eq!(final_report.issue_count(), 4);
}

#[test]
fn grade_buckets() {
    let cases = [
        (100.0, Grade::A),
        (90.0, Grade::A),
        (89.96, Grade::A),
        (89.9, Grade::B),
        (80.0, Grade::B),
        (70.0, Grade::C),
        (65.5, Grade::D),
        (50.0, Grade::E),
        (49.9, Grade::F),
        (0.0, Grade::F),
    ];
    for (score, grade) in cases {
        let final_report = assemble(vec![report("a", score, 100.0, &[])]);
        assert_eq!(final_report.overall_grade, grade, "score {}", score);
    }
}

#[test]
fn empty_input_is_an_f() {
    let final_report = assemble(Vec::new());

    assert_close(final_report.total_score, 0.0);
    assert_eq!(final_report.overall_grade, Grade::F);
    assert_eq!(final_report.issue_count(), 0);
}

#[test]
fn category_lookup() {
    let final_report = assemble(vec![report("Security", 3.0, 10.0, &[Severity::Critical])]);

    assert!(final_report.category("Security").is_some());
    assert!(final_report.category("Schema & Types").is_none());
}

#[test]
fn serialized_report_uses_wire_names() {
    let final_report = assemble(vec![report("Security", 2.94, 10.0, &[Severity::Critical])]);

    let value = serde_json::to_value(&final_report).unwrap();

    assert_eq!(value["overall_grade"], "F");
    assert_eq!(value["severity_counts"]["CRITICAL"], 1);
    let category = &value["reports"][0];
    assert_eq!(category["subscorer"], "Security");
    assert_eq!(category["score"], 2.9);
    assert_eq!(category["max_score"], 10.0);
    assert_eq!(category["issues"][0]["severity"], "CRITICAL");
    assert!(category["issues"][0].get("path").is_none());
}

#[test]
fn serialized_budgets_are_rounded() {
    let final_report = assemble(vec![report("Custom", 3.333, 12.345, &[])]);

    let value = serde_json::to_value(&final_report).unwrap();

    assert_eq!(value["reports"][0]["score"], 3.3);
    assert_eq!(value["reports"][0]["max_score"], 12.3);
}
