use apiscore::report::{ScoringReport, round1};
use apiscore::{Grade, Issue, Severity, assemble};
use proptest::prelude::*;

fn arb_report() -> impl Strategy<Value = ScoringReport> {
    (
        0.0f64..30.0,
        0.0f64..=1.0,
        prop::collection::vec(prop::sample::select(Severity::ALL.to_vec()), 0..6),
    )
        .prop_map(|(max, share, severities)| {
            let mut report = ScoringReport::new("r", max);
            report.points = max * share;
            report.issues = severities
                .into_iter()
                .map(|s| Issue::new(s, "generated"))
                .collect();
            report
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn histogram_counts_every_issue(reports in prop::collection::vec(arb_report(), 0..8)) {
        let issues: usize = reports.iter().map(|r| r.issues.len()).sum();
        let report = assemble(reports);

        prop_assert_eq!(report.severity_counts.len(), Severity::ALL.len());
        prop_assert_eq!(report.issue_count(), issues);
    }

    #[test]
    fn total_never_exceeds_maximum(reports in prop::collection::vec(arb_report(), 0..8)) {
        let report = assemble(reports);
        prop_assert!(report.total_score <= report.max_total_score);
    }

    #[test]
    fn grade_follows_rounded_total(reports in prop::collection::vec(arb_report(), 0..8)) {
        let report = assemble(reports);
        prop_assert_eq!(report.overall_grade, Grade::from_score(report.total_score));
        prop_assert_eq!(round1(report.total_score), report.total_score);
    }

    #[test]
    fn grades_are_monotonic(a in 0.0f64..100.0, b in 0.0f64..100.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        // Grade::A sorts first, so a higher score never sorts later.
        prop_assert!(Grade::from_score(high) <= Grade::from_score(low));
    }
}
