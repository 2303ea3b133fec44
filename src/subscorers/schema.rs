use super::{SCHEMA_CATEGORY, Subscorer, issues_at};
use crate::config::ScoringConfig;
use crate::enums::Severity;
use crate::parsed::ParsedSpecification;
use crate::report::{Penalty, ScoringReport};

/// Flags free-form object schemas and media types without a schema.
#[derive(Clone, Debug)]
pub struct SchemaSubscorer {
    points: f64,
}

impl SchemaSubscorer {
    pub fn new(points: f64) -> Self {
        SchemaSubscorer { points }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        SchemaSubscorer::new(config.budgets.schema)
    }
}

impl Subscorer for SchemaSubscorer {
    fn category(&self) -> &str {
        SCHEMA_CATEGORY
    }

    fn max_points(&self) -> f64 {
        self.points
    }

    fn score(&self, facts: &ParsedSpecification<'_>) -> ScoringReport {
        let facts = &facts.schemas;

        let penalties = [
            Penalty::Batch {
                severity: Severity::Medium,
                issues: issues_at(
                    &facts.free_form_schemas,
                    Severity::Medium,
                    "Free-form schema found at",
                    "Specify a concrete schema for this path.",
                ),
            },
            Penalty::Batch {
                severity: Severity::High,
                issues: issues_at(
                    &facts.missing_schemas,
                    Severity::High,
                    "Missing schema in media type at",
                    "Specify a concrete schema for this path.",
                ),
            },
        ];

        ScoringReport::fold(SCHEMA_CATEGORY, self.points, penalties)
    }
}
