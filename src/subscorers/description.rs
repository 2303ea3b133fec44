use super::{DESCRIPTION_CATEGORY, Subscorer, issues_at};
use crate::config::ScoringConfig;
use crate::enums::Severity;
use crate::parsed::ParsedSpecification;
use crate::report::{Penalty, ScoringReport};

/// Flags operations, parameters, request bodies and responses whose
/// description is missing or too short. Each list is charged once.
#[derive(Clone, Debug)]
pub struct DescriptionSubscorer {
    points: f64,
    min_length: usize,
}

impl DescriptionSubscorer {
    pub fn new(points: f64) -> Self {
        let defaults = ScoringConfig::default();
        DescriptionSubscorer {
            points,
            min_length: defaults.description_min_length,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        DescriptionSubscorer {
            points: config.budgets.description,
            min_length: config.description_min_length,
        }
    }
}

impl Subscorer for DescriptionSubscorer {
    fn category(&self) -> &str {
        DESCRIPTION_CATEGORY
    }

    fn max_points(&self) -> f64 {
        self.points
    }

    fn score(&self, facts: &ParsedSpecification<'_>) -> ScoringReport {
        let facts = &facts.descriptions;
        let short_suggestion = format!(
            "Expand description to be at least {} characters.",
            self.min_length
        );

        let penalties = [
            Penalty::Batch {
                severity: Severity::Low,
                issues: issues_at(
                    &facts.missing_descriptions,
                    Severity::Low,
                    "Missing description at",
                    "Add a meaningful description.",
                ),
            },
            Penalty::Batch {
                severity: Severity::Low,
                issues: issues_at(
                    &facts.short_descriptions,
                    Severity::Low,
                    "Description too short at",
                    &short_suggestion,
                ),
            },
        ];

        ScoringReport::fold(DESCRIPTION_CATEGORY, self.points, penalties)
    }
}
