use indexmap::IndexMap;

use super::{RESPONSE_CODES_CATEGORY, Subscorer, issues_at};
use crate::config::{CodeRange, ScoringConfig};
use crate::enums::Severity;
use crate::parsed::{ParsedSpecification, Path};
use crate::primitives::StatusKey;
use crate::report::{Penalty, ScoringReport};

/// Checks that operations declare responses, cover success and error
/// classes, and that responses carry content unless their code allows none.
#[derive(Clone, Debug)]
pub struct ResponseCodesSubscorer {
    points: f64,
    success_codes: CodeRange,
    error_codes: CodeRange,
    no_content_codes: Vec<u16>,
}

impl ResponseCodesSubscorer {
    pub fn new(points: f64) -> Self {
        let defaults = ScoringConfig::default();
        ResponseCodesSubscorer {
            points,
            success_codes: defaults.success_codes,
            error_codes: defaults.error_codes,
            no_content_codes: defaults.no_content_codes,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        ResponseCodesSubscorer {
            points: config.budgets.response_codes,
            success_codes: config.success_codes,
            error_codes: config.error_codes,
            no_content_codes: config.no_content_codes.clone(),
        }
    }
}

/// Findings derived from the response list.
#[derive(Default)]
struct CodeFindings {
    missing_success: Vec<Path>,
    missing_error: Vec<Path>,
    empty_content: Vec<Path>,
}

impl ResponseCodesSubscorer {
    fn inspect(&self, facts: &ParsedSpecification<'_>) -> CodeFindings {
        let mut findings = CodeFindings::default();

        // Responses grouped by their operation's `responses` path.
        let mut by_operation: IndexMap<&[String], Vec<Option<StatusKey>>> = IndexMap::new();
        for (path, response) in &facts.response_codes.responses {
            let Some((code, parent)) = path.split_last() else {
                continue;
            };
            let key = StatusKey::parse(code);
            by_operation.entry(parent).or_default().push(key);

            let allowed_empty = key.is_some_and(|k| k.is_one_of(&self.no_content_codes));
            if response.has_no_content() && !allowed_empty {
                findings.empty_content.push(path.clone());
            }
        }

        for (parent, keys) in by_operation {
            let covers = |range: CodeRange| keys.iter().flatten().any(|k| k.within(range));
            if !covers(self.success_codes) {
                findings.missing_success.push(parent.to_vec());
            }
            if !covers(self.error_codes) {
                findings.missing_error.push(parent.to_vec());
            }
        }

        findings
    }
}

impl Subscorer for ResponseCodesSubscorer {
    fn category(&self) -> &str {
        RESPONSE_CODES_CATEGORY
    }

    fn max_points(&self) -> f64 {
        self.points
    }

    fn score(&self, facts: &ParsedSpecification<'_>) -> ScoringReport {
        let findings = self.inspect(facts);

        let penalties = [
            Penalty::Batch {
                severity: Severity::Low,
                issues: issues_at(
                    &facts.response_codes.missing_responses,
                    Severity::Low,
                    "Missing responses definition at",
                    "Add a responses definition to this operation.",
                ),
            },
            Penalty::Batch {
                severity: Severity::Medium,
                issues: issues_at(
                    &findings.missing_success,
                    Severity::Medium,
                    "Missing success response code at",
                    "Add at least one success response to this operation.",
                ),
            },
            Penalty::Batch {
                severity: Severity::Medium,
                issues: issues_at(
                    &findings.missing_error,
                    Severity::Medium,
                    "Missing error response code at",
                    "Add appropriate error responses to this operation.",
                ),
            },
            Penalty::Batch {
                severity: Severity::Low,
                issues: issues_at(
                    &findings.empty_content,
                    Severity::Low,
                    "Response has no content defined at",
                    "Add a content definition for this response.",
                ),
            },
        ];

        ScoringReport::fold(RESPONSE_CODES_CATEGORY, self.points, penalties)
    }
}
