//! Ordered composite of subscorers.

use tracing::debug;

use crate::config::ScoringConfig;
use crate::parsed::ParsedSpecification;
use crate::report::ScoringReport;
use crate::subscorers::{
    DescriptionSubscorer, ExamplesSubscorer, MiscSubscorer, PathsSubscorer,
    ResponseCodesSubscorer, SchemaSubscorer, SecuritySubscorer, Subscorer,
};

/// Runs every registered subscorer against the same facts. Reports come
/// back in registration order.
#[derive(Default)]
pub struct ScoringEngine {
    subscorers: Vec<Box<dyn Subscorer>>,
}

impl ScoringEngine {
    /// An engine with nothing registered.
    pub fn new() -> Self {
        ScoringEngine::default()
    }

    /// The seven built-in subscorers, budgeted from `config`.
    pub fn from_config(config: &ScoringConfig) -> Self {
        let mut engine = ScoringEngine::new();
        engine.add_subscorer(Box::new(ExamplesSubscorer::from_config(config)));
        engine.add_subscorer(Box::new(SchemaSubscorer::from_config(config)));
        engine.add_subscorer(Box::new(DescriptionSubscorer::from_config(config)));
        engine.add_subscorer(Box::new(PathsSubscorer::from_config(config)));
        engine.add_subscorer(Box::new(ResponseCodesSubscorer::from_config(config)));
        engine.add_subscorer(Box::new(SecuritySubscorer::from_config(config)));
        engine.add_subscorer(Box::new(MiscSubscorer::from_config(config)));
        engine
    }

    pub fn add_subscorer(&mut self, subscorer: Box<dyn Subscorer>) {
        self.subscorers.push(subscorer);
    }

    /// Unregister the first subscorer with the given category name.
    pub fn remove_subscorer(&mut self, category: &str) -> Option<Box<dyn Subscorer>> {
        let index = self
            .subscorers
            .iter()
            .position(|s| s.category() == category)?;
        Some(self.subscorers.remove(index))
    }

    /// Registered category names, in order.
    pub fn categories(&self) -> Vec<&str> {
        self.subscorers.iter().map(|s| s.category()).collect()
    }

    pub fn max_points(&self) -> f64 {
        self.subscorers.iter().map(|s| s.max_points()).sum()
    }

    pub fn len(&self) -> usize {
        self.subscorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscorers.is_empty()
    }

    pub fn score_all(&self, facts: &ParsedSpecification<'_>) -> Vec<ScoringReport> {
        self.subscorers
            .iter()
            .map(|subscorer| run(subscorer.as_ref(), facts))
            .collect()
    }

    /// Like [`score_all`](Self::score_all), with subscorers fanned out over
    /// the rayon pool. Indexed collection keeps registration order.
    #[cfg(feature = "parallel")]
    pub fn score_all_parallel(&self, facts: &ParsedSpecification<'_>) -> Vec<ScoringReport> {
        use rayon::prelude::*;

        self.subscorers
            .par_iter()
            .map(|subscorer| run(subscorer.as_ref(), facts))
            .collect()
    }
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("subscorers", &self.categories())
            .finish()
    }
}

fn run(subscorer: &dyn Subscorer, facts: &ParsedSpecification<'_>) -> ScoringReport {
    let report = subscorer.score(facts);
    debug!(
        category = %report.category,
        points = report.points,
        max_points = report.max_points,
        issues = report.issues.len(),
        "scored category"
    );
    report
}
