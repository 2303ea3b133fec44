use super::{PATHS_CATEGORY, Subscorer};
use crate::config::ScoringConfig;
use crate::enums::{NamingConvention, Severity};
use crate::parsed::ParsedSpecification;
use crate::primitives::{compare_naming, crud_violation, paths_overlap};
use crate::report::{Issue, Penalty, ScoringReport};

/// CRUD heuristics, overlapping templates and mixed naming conventions.
/// Every finding is charged on its own.
#[derive(Clone, Debug)]
pub struct PathsSubscorer {
    points: f64,
}

impl PathsSubscorer {
    pub fn new(points: f64) -> Self {
        PathsSubscorer { points }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        PathsSubscorer::new(config.budgets.paths)
    }
}

impl Subscorer for PathsSubscorer {
    fn category(&self) -> &str {
        PATHS_CATEGORY
    }

    fn max_points(&self) -> f64 {
        self.points
    }

    fn score(&self, facts: &ParsedSpecification<'_>) -> ScoringReport {
        let operations = &facts.paths.path_to_operations;
        let templates: Vec<&str> = operations.keys().map(String::as_str).collect();

        let mut crud = Vec::new();
        for (template, methods) in operations {
            for method in methods {
                if crud_violation(template, *method) {
                    crud.push(
                        Issue::new(
                            Severity::Low,
                            format!(
                                "CRUD convention violation at '{}' for operation '{}'",
                                template, method
                            ),
                        )
                        .at(format!("paths -> {} -> {}", template, method))
                        .suggest(
                            "'GET' for retrieval, 'POST' for creation, PUT/PATCH for updates, DELETE for removal.",
                        ),
                    );
                }
            }
        }

        let mut overlapping = Vec::new();
        let mut inconsistent = Vec::new();
        let (mut kebab, mut snake) = (0usize, 0usize);
        for (i, first) in templates.iter().enumerate() {
            for second in &templates[i + 1..] {
                if paths_overlap(first, second) {
                    overlapping.push((*first, *second));
                }
                let naming = compare_naming(first, second);
                match naming.majority {
                    Some(NamingConvention::Kebab) => kebab += 1,
                    Some(NamingConvention::Snake) => snake += 1,
                    None => {}
                }
                if !naming.consistent {
                    inconsistent.push((*first, *second));
                }
            }
        }

        let preferred = if snake > kebab {
            NamingConvention::Snake
        } else {
            NamingConvention::Kebab
        };
        let naming_suggestion = format!(
            "Stick with '{}', most of your paths already use it.",
            preferred.as_str()
        );

        let overlap_issues = overlapping.into_iter().map(|(a, b)| {
            Issue::new(
                Severity::High,
                format!("Overlapping paths: '{}' and '{}'", a, b),
            )
            .suggest("Remove one of the paths.")
        });
        let naming_issues = inconsistent.into_iter().map(|(a, b)| {
            Issue::new(
                Severity::Medium,
                format!("Inconsistent naming between '{}' and '{}'", a, b),
            )
            .suggest(naming_suggestion.clone())
        });

        let penalties = crud
            .into_iter()
            .chain(overlap_issues)
            .chain(naming_issues)
            .map(Penalty::Instance);

        ScoringReport::fold(PATHS_CATEGORY, self.points, penalties)
    }
}
