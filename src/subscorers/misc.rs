use super::{MISC_CATEGORY, Subscorer};
use crate::config::ScoringConfig;
use crate::enums::Severity;
use crate::parsed::{MiscFacts, ParsedSpecification};
use crate::primitives::is_versioned;
use crate::report::{Issue, Penalty, ScoringReport};

/// Versioned paths, declared servers and root-level tag declarations.
#[derive(Clone, Debug)]
pub struct MiscSubscorer {
    points: f64,
    versioned_paths_threshold: f64,
    referenced_tags_threshold: f64,
}

impl MiscSubscorer {
    pub fn new(points: f64) -> Self {
        let defaults = ScoringConfig::default();
        MiscSubscorer {
            points,
            versioned_paths_threshold: defaults.versioned_paths_threshold,
            referenced_tags_threshold: defaults.referenced_tags_threshold,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        MiscSubscorer {
            points: config.budgets.misc,
            versioned_paths_threshold: config.versioned_paths_threshold,
            referenced_tags_threshold: config.referenced_tags_threshold,
        }
    }
}

/// Share of `total` items that satisfy a check; 1.0 when there are none.
fn ratio(matching: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        matching as f64 / total as f64
    }
}

pub fn versioned_ratio(misc: &MiscFacts<'_>) -> f64 {
    let versioned = misc
        .paths_defined
        .iter()
        .filter(|p| is_versioned(p))
        .count();
    ratio(versioned, misc.paths_defined.len())
}

pub fn declared_tag_ratio(misc: &MiscFacts<'_>) -> f64 {
    let declared = misc
        .tags_from_operations
        .iter()
        .filter(|t| t.is_in(&misc.tags_defined))
        .count();
    ratio(declared, misc.tags_from_operations.len())
}

impl Subscorer for MiscSubscorer {
    fn category(&self) -> &str {
        MISC_CATEGORY
    }

    fn max_points(&self) -> f64 {
        self.points
    }

    fn score(&self, facts: &ParsedSpecification<'_>) -> ScoringReport {
        let misc = &facts.misc;
        let undefined_tags = misc.undefined_tags();
        let mut issues = Vec::new();

        if versioned_ratio(misc) < self.versioned_paths_threshold {
            issues.push(
                Issue::new(Severity::Low, "Paths are not consistently versioned")
                    .suggest("Add versioned paths to the specification"),
            );
        }

        if misc.servers_defined.is_empty() {
            issues.push(
                Issue::new(Severity::Medium, "Servers are not defined")
                    .suggest("Add servers to the specification"),
            );
        }

        if misc.tags_defined.is_empty() {
            issues.push(
                Issue::new(Severity::Medium, "Tags are not defined")
                    .suggest("Add tags to the specification"),
            );
        } else if declared_tag_ratio(misc) < self.referenced_tags_threshold {
            issues.push(
                Issue::new(
                    Severity::Medium,
                    "Tags are not consistently referenced from operations",
                )
                .suggest(format!(
                    "Define these tags on root level: {}",
                    undefined_tags.join(", ")
                )),
            );
        }

        ScoringReport::fold(
            MISC_CATEGORY,
            self.points,
            issues.into_iter().map(Penalty::Instance),
        )
    }
}
