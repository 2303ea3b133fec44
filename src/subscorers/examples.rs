use super::{EXAMPLES_CATEGORY, Subscorer, issues_at};
use crate::config::ScoringConfig;
use crate::enums::Severity;
use crate::parsed::{ParsedSpecification, Path};
use crate::report::{Penalty, ScoringReport};
use crate::types::{Map, MediaType};

/// Flags required request bodies and content-bearing responses of major
/// operations that carry no example.
#[derive(Clone, Debug)]
pub struct ExamplesSubscorer {
    points: f64,
}

impl ExamplesSubscorer {
    pub fn new(points: f64) -> Self {
        ExamplesSubscorer { points }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        ExamplesSubscorer::new(config.budgets.examples)
    }
}

impl Subscorer for ExamplesSubscorer {
    fn category(&self) -> &str {
        EXAMPLES_CATEGORY
    }

    fn max_points(&self) -> f64 {
        self.points
    }

    fn score(&self, facts: &ParsedSpecification<'_>) -> ScoringReport {
        let facts = &facts.examples;

        let missing_requests: Vec<Path> = facts
            .request_bodies
            .iter()
            .filter(|(_, body)| body.required == Some(true) && !any_example(&body.content))
            .map(|(path, _)| path.clone())
            .collect();

        let missing_responses: Vec<Path> = facts
            .responses
            .iter()
            .filter_map(|(path, response)| {
                let content = response.content.as_ref()?;
                (!any_example(content)).then(|| path.clone())
            })
            .collect();

        let penalties = [
            Penalty::Batch {
                severity: Severity::Medium,
                issues: issues_at(
                    &missing_requests,
                    Severity::Medium,
                    "Missing request example at major endpoint",
                    "Add an example for the request body.",
                ),
            },
            Penalty::Batch {
                severity: Severity::Medium,
                issues: issues_at(
                    &missing_responses,
                    Severity::Medium,
                    "Missing response example at endpoint",
                    "Add examples for responses.",
                ),
            },
        ];

        ScoringReport::fold(EXAMPLES_CATEGORY, self.points, penalties)
    }
}

fn any_example(content: &Map<MediaType>) -> bool {
    content.values().any(has_example)
}

/// `example`, a non-empty `examples` map, or an example on the schema.
fn has_example(media: &MediaType) -> bool {
    media.example.is_some()
        || media.examples.as_ref().is_some_and(|e| !e.is_empty())
        || media.schema.as_ref().is_some_and(|s| s.example.is_some())
}
