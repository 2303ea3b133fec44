use apiscore::config::ScoringConfig;
use apiscore::parsed::ParsedSpecification;
use apiscore::report::ScoringReport;
use apiscore::subscorers::{
    DESCRIPTION_CATEGORY, EXAMPLES_CATEGORY, MISC_CATEGORY, PATHS_CATEGORY,
    RESPONSE_CODES_CATEGORY, SCHEMA_CATEGORY, SECURITY_CATEGORY, SchemaSubscorer, Subscorer,
};
use apiscore::{Issue, ScoringEngine, Severity};

use super::common::assert_close;

struct Fixed;

impl Subscorer for Fixed {
    fn category(&self) -> &str {
        "Fixed"
    }

    fn max_points(&self) -> f64 {
        5.0
    }

    fn score(&self, _facts: &ParsedSpecification<'_>) -> ScoringReport {
        ScoringReport::new("Fixed", 5.0).with_issue(Issue::new(Severity::High, "always"))
    }
}

#[test]
fn built_in_order() {
    let engine = ScoringEngine::from_config(&ScoringConfig::default());

    assert_eq!(engine.categories(), vec![
        EXAMPLES_CATEGORY,
        SCHEMA_CATEGORY,
        DESCRIPTION_CATEGORY,
        PATHS_CATEGORY,
        RESPONSE_CODES_CATEGORY,
        SECURITY_CATEGORY,
        MISC_CATEGORY,
    ]);
    assert_close(engine.max_points(), 100.0);
}

#[test]
fn reports_follow_registration_order() {
    let engine = ScoringEngine::from_config(&ScoringConfig::default());
    let reports = engine.score_all(&ParsedSpecification::default());

    let categories: Vec<&str> = reports.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, engine.categories());
}

#[test]
fn empty_engine_scores_nothing() {
    let engine = ScoringEngine::new();
    assert!(engine.is_empty());
    assert!(engine.score_all(&ParsedSpecification::default()).is_empty());
}

#[test]
fn custom_subscorers_run_last() {
    let mut engine = ScoringEngine::new();
    engine.add_subscorer(Box::new(SchemaSubscorer::new(20.0)));
    engine.add_subscorer(Box::new(Fixed));

    let reports = engine.score_all(&ParsedSpecification::default());

    assert_eq!(engine.len(), 2);
    assert_eq!(reports[1].category, "Fixed");
    assert_close(reports[1].points, 3.0);
}

#[test]
fn remove_by_category() {
    let mut engine = ScoringEngine::from_config(&ScoringConfig::default());

    let removed = engine.remove_subscorer(SECURITY_CATEGORY);

    assert_eq!(removed.map(|s| s.category().to_string()).as_deref(), Some(SECURITY_CATEGORY));
    assert_eq!(engine.len(), 6);
    assert!(!engine.categories().contains(&SECURITY_CATEGORY));
    assert!(engine.remove_subscorer("Unknown").is_none());
}

#[test]
fn budgets_flow_from_config() {
    let mut config = ScoringConfig::default();
    config.budgets.security = 30.0;

    let engine = ScoringEngine::from_config(&config);
    assert_close(engine.max_points(), 120.0);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_matches_sequential() {
    let engine = ScoringEngine::from_config(&ScoringConfig::default());
    let facts = ParsedSpecification::default();

    assert_eq!(engine.score_all_parallel(&facts), engine.score_all(&facts));
}
