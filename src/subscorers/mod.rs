//! Rule evaluators, one per category.
//!
//! Each subscorer reads its own buckets of the [`ParsedSpecification`] and
//! folds its findings into a [`ScoringReport`]. Subscorers share no state;
//! the only write any of them performs is the misc subscorer filling the
//! write-once undefined-tag list.

mod description;
mod examples;
mod misc;
mod paths;
mod response_codes;
mod schema;
mod security;

pub use description::DescriptionSubscorer;
pub use examples::ExamplesSubscorer;
pub use misc::{MiscSubscorer, declared_tag_ratio, versioned_ratio};
pub use paths::PathsSubscorer;
pub use response_codes::ResponseCodesSubscorer;
pub use schema::SchemaSubscorer;
pub use security::{MissingFields, SecuritySubscorer, missing_fields};

use crate::enums::Severity;
use crate::parsed::{ParsedSpecification, path_to_string};
use crate::report::{Issue, ScoringReport};

pub const DESCRIPTION_CATEGORY: &str = "Descriptions & Documentation";
pub const EXAMPLES_CATEGORY: &str = "Examples & Samples";
pub const MISC_CATEGORY: &str = "Miscellaneous Best Practices";
pub const PATHS_CATEGORY: &str = "Paths & Operations";
pub const RESPONSE_CODES_CATEGORY: &str = "Response Codes";
pub const SCHEMA_CATEGORY: &str = "Schema & Types";
pub const SECURITY_CATEGORY: &str = "Security";

/// A rule evaluator for one category.
pub trait Subscorer: Send + Sync {
    /// Category name, as it appears in the report.
    fn category(&self) -> &str;

    /// Starting budget of the category.
    fn max_points(&self) -> f64;

    fn score(&self, facts: &ParsedSpecification<'_>) -> ScoringReport;
}

/// One issue per path, with the rendered path as both location and message
/// suffix: `"{prefix}: {path}"`.
fn issues_at(
    paths: &[Vec<String>],
    severity: Severity,
    prefix: &str,
    suggestion: &str,
) -> Vec<Issue> {
    paths
        .iter()
        .map(|path| {
            let rendered = path_to_string(path);
            Issue::new(severity, format!("{}: {}", prefix, rendered))
                .at(rendered)
                .suggest(suggestion)
        })
        .collect()
}
