use super::{SECURITY_CATEGORY, Subscorer};
use crate::config::ScoringConfig;
use crate::enums::Severity;
use crate::parsed::{NamedRef, ParsedSpecification, Path, path_to_string};
use crate::registry::{flow_has, flow_names, lookup_flow, lookup_scheme, scheme_has};
use crate::report::{Issue, Penalty, ScoringReport};
use crate::types::SecurityScheme;

/// Checks that security schemes exist, are complete for their type, and
/// that definitions and references agree.
#[derive(Clone, Debug)]
pub struct SecuritySubscorer {
    points: f64,
}

impl SecuritySubscorer {
    pub fn new(points: f64) -> Self {
        SecuritySubscorer { points }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        SecuritySubscorer::new(config.budgets.security)
    }
}

/// A scheme (or one of its OAuth flows) lacking required fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingFields {
    pub path: Path,
    pub scheme_type: String,
    pub fields: Vec<&'static str>,
}

impl MissingFields {
    fn into_issue(self) -> Issue {
        let rendered = path_to_string(&self.path);
        Issue::new(
            Severity::Zero,
            format!(
                "Security scheme of type '{}' at {} is missing required fields: {}",
                self.scheme_type,
                rendered,
                self.fields.join(", ")
            ),
        )
        .at(rendered)
        .suggest("Add missing fields")
    }
}

/// Every missing-field group of one scheme: the scheme itself first, then
/// each declared OAuth flow in registry order.
pub fn missing_fields(path: &[String], scheme: &SecurityScheme) -> Vec<MissingFields> {
    let Some(entry) = lookup_scheme(&scheme.scheme_type) else {
        return Vec::new();
    };
    let group = |path: Path, fields: Vec<&'static str>| MissingFields {
        path,
        scheme_type: scheme.scheme_type.clone(),
        fields,
    };

    let mut found = Vec::new();
    let absent: Vec<&'static str> = entry
        .required
        .iter()
        .copied()
        .filter(|field| !scheme_has(scheme, field))
        .collect();
    if !absent.is_empty() {
        found.push(group(path.to_vec(), absent));
    }

    let Some(flows) = &scheme.flows else {
        return found;
    };
    let declared = flows.declared();
    for (name, flow) in &declared {
        let Some(flow_entry) = lookup_flow(name) else {
            continue;
        };
        let absent: Vec<&'static str> = flow_entry
            .required
            .iter()
            .copied()
            .filter(|field| !flow_has(flow, field))
            .collect();
        if !absent.is_empty() {
            let mut flow_path = path.to_vec();
            flow_path.extend(["flows".to_string(), name.to_string()]);
            found.push(group(flow_path, absent));
        }
    }
    if declared.is_empty() && scheme.scheme_type == "oauth2" {
        found.push(group(path.to_vec(), flow_names()));
    }

    found
}

impl Subscorer for SecuritySubscorer {
    fn category(&self) -> &str {
        SECURITY_CATEGORY
    }

    fn max_points(&self) -> f64 {
        self.points
    }

    fn score(&self, facts: &ParsedSpecification<'_>) -> ScoringReport {
        let facts = &facts.security;

        if facts.defined_schemes.is_empty() {
            let issue = Issue::new(Severity::Critical, "Security schemes are not defined")
                .suggest("Define at least one security scheme");
            return ScoringReport::new(SECURITY_CATEGORY, self.points).with_issue(issue);
        }

        let incomplete = facts
            .schemes
            .iter()
            .flat_map(|(path, scheme)| missing_fields(path, scheme))
            .map(MissingFields::into_issue);

        let referenced: Vec<&NamedRef> = facts
            .referenced_schemes
            .iter()
            .chain(&facts.operation_referenced_schemes)
            .collect();

        let unreferenced = facts
            .defined_schemes
            .iter()
            .filter(|defined| !referenced.iter().any(|r| r.same_name(defined)))
            .map(|defined| {
                Issue::new(
                    Severity::High,
                    format!(
                        "Security scheme '{}' is defined, but not referenced",
                        defined.name
                    ),
                )
                .at(path_to_string(&defined.path))
                .suggest("Reference the defined security schemes")
            });

        let undefined = referenced
            .iter()
            .filter(|r| !r.is_in(&facts.defined_schemes))
            .map(|r| {
                Issue::new(
                    Severity::Medium,
                    format!("Security scheme '{}' is referenced, but not defined", r.name),
                )
                .at(path_to_string(&r.path))
                .suggest("Define the referenced security schemes")
            });

        let penalties = incomplete
            .chain(unreferenced)
            .chain(undefined)
            .map(Penalty::Instance);

        ScoringReport::fold(SECURITY_CATEGORY, self.points, penalties)
    }
}
