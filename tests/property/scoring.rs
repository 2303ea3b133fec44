use apiscore::report::{Penalty, ScoringReport};
use apiscore::{Issue, Severity};
use proptest::prelude::*;

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn arb_penalty() -> impl Strategy<Value = Penalty> {
    prop_oneof![
        arb_severity().prop_map(|s| Penalty::Instance(Issue::new(s, "instance"))),
        (arb_severity(), 0usize..5).prop_map(|(severity, count)| Penalty::Batch {
            severity,
            issues: (0..count).map(|_| Issue::new(severity, "batched")).collect(),
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn points_stay_within_budget(
        max in 0.0f64..100.0,
        penalties in prop::collection::vec(arb_penalty(), 0..12),
    ) {
        let report = ScoringReport::fold("p", max, penalties);
        prop_assert!(report.points >= 0.0);
        prop_assert!(report.points <= max);
    }

    #[test]
    fn penalties_never_raise_points(
        max in 0.0f64..100.0,
        penalties in prop::collection::vec(arb_penalty(), 1..12),
    ) {
        let mut report = ScoringReport::new("p", max);
        for penalty in penalties {
            let before = report.points;
            report = report.apply(penalty);
            prop_assert!(report.points <= before);
        }
    }

    #[test]
    fn batch_charge_ignores_issue_count(
        severity in arb_severity(),
        count in 1usize..20,
    ) {
        let issues = (0..count).map(|_| Issue::new(severity, "batched")).collect();
        let report = ScoringReport::new("p", 10.0).with_batch(severity, issues);

        prop_assert_eq!(report.issues.len(), count);
        prop_assert!((report.points - 10.0 * severity.multiplier()).abs() < 1e-9);
    }

    #[test]
    fn every_issue_is_recorded(penalties in prop::collection::vec(arb_penalty(), 0..12)) {
        let expected: usize = penalties
            .iter()
            .map(|p| match p {
                Penalty::Instance(_) => 1,
                Penalty::Batch { issues, .. } => issues.len(),
            })
            .sum();
        let report = ScoringReport::fold("p", 10.0, penalties);
        prop_assert_eq!(report.issues.len(), expected);
    }
}
