//! Structural validation against rules V-001 through V-012.
//!
//! Returns **all** errors and warnings, not just the first. Validation does not
//! modify the document. Scoring only runs on documents without errors.

use crate::error::*;
use crate::primitives::StatusKey;
use crate::registry::lookup_scheme;
use crate::types::*;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static OPENAPI_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^3\.\d+\.\d+(-.+)?$").unwrap());

static TEMPLATE_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^{}]*\{[^{}/]+\})*[^{}]*$").unwrap());

const PARAMETER_LOCATIONS: &[&str] = &["query", "header", "path", "cookie"];

/// Validate a parsed document against every structural rule.
/// Returns a ValidationResult containing all errors and warnings found.
pub fn validate(doc: &Document) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    v001_openapi_version(doc, &mut errors);
    v002_info_title(doc, &mut errors);
    v003_info_version(doc, &mut errors);
    v004_path_keys(doc, &mut errors);
    v005_path_templates(doc, &mut errors);
    v006_response_keys(doc, &mut errors);
    v007_parameter_location(doc, &mut errors);
    v008_path_parameters_required(doc, &mut errors);
    v009_security_scheme_type(doc, &mut errors);
    v010_unique_operation_ids(doc, &mut errors);
    v011_unique_tag_names(doc, &mut errors);
    v012_server_urls(doc, &mut errors);

    w001_no_paths(doc, &mut warnings);

    ValidationResult { errors, warnings }
}

// ─── Helper: collect every operation under `paths` ──────────────────────────

struct OperationInfo<'a> {
    operation: &'a Operation,
    path_prefix: String,
}

fn collect_operations(doc: &Document) -> Vec<OperationInfo<'_>> {
    let Some(paths) = &doc.paths else {
        return Vec::new();
    };
    paths
        .iter()
        .flat_map(|(template, item)| {
            item.operations()
                .into_iter()
                .map(move |(method, operation)| OperationInfo {
                    operation,
                    path_prefix: format!("paths.{}.{}", template, method),
                })
        })
        .collect()
}

/// Every parameter list in the document, with its dot-path.
fn collect_parameters(doc: &Document) -> Vec<(&Parameter, String)> {
    let mut found = Vec::new();
    if let Some(paths) = &doc.paths {
        for (template, item) in paths {
            if let Some(params) = &item.parameters {
                for (i, p) in params.iter().enumerate() {
                    found.push((p, format!("paths.{}.parameters[{}]", template, i)));
                }
            }
        }
    }
    for info in collect_operations(doc) {
        if let Some(params) = &info.operation.parameters {
            for (i, p) in params.iter().enumerate() {
                found.push((p, format!("{}.parameters[{}]", info.path_prefix, i)));
            }
        }
    }
    if let Some(params) = doc.components.as_ref().and_then(|c| c.parameters.as_ref()) {
        for (name, p) in params {
            found.push((p, format!("components.parameters.{}", name)));
        }
    }
    found
}

fn error(rule: &str, path: impl Into<String>, message: impl Into<String>) -> ValidationError {
    ValidationError {
        rule: rule.to_string(),
        path: path.into(),
        message: message.into(),
    }
}

// ─── V-001 ──────────────────────────────────────────────────────────────────

fn v001_openapi_version(doc: &Document, errors: &mut Vec<ValidationError>) {
    if !OPENAPI_VERSION_RE.is_match(&doc.openapi) {
        errors.push(error(
            "V-001",
            "openapi",
            format!("openapi field must be a 3.x version, got '{}'", doc.openapi),
        ));
    }
}

// ─── V-002 ──────────────────────────────────────────────────────────────────

fn v002_info_title(doc: &Document, errors: &mut Vec<ValidationError>) {
    if doc.info.title.trim().is_empty() {
        errors.push(error("V-002", "info.title", "info.title must not be empty"));
    }
}

// ─── V-003 ──────────────────────────────────────────────────────────────────

fn v003_info_version(doc: &Document, errors: &mut Vec<ValidationError>) {
    if doc.info.version.trim().is_empty() {
        errors.push(error(
            "V-003",
            "info.version",
            "info.version must not be empty",
        ));
    }
}

// ─── V-004 ──────────────────────────────────────────────────────────────────

fn v004_path_keys(doc: &Document, errors: &mut Vec<ValidationError>) {
    if let Some(paths) = &doc.paths {
        for template in paths.keys() {
            if !template.starts_with('/') {
                errors.push(error(
                    "V-004",
                    format!("paths.{}", template),
                    format!("path '{}' must start with '/'", template),
                ));
            }
        }
    }
}

// ─── V-005 ──────────────────────────────────────────────────────────────────

fn v005_path_templates(doc: &Document, errors: &mut Vec<ValidationError>) {
    if let Some(paths) = &doc.paths {
        for template in paths.keys() {
            let well_formed = template
                .split('/')
                .all(|segment| TEMPLATE_SEGMENT_RE.is_match(segment));
            if !well_formed {
                errors.push(error(
                    "V-005",
                    format!("paths.{}", template),
                    format!("path '{}' has unbalanced or empty template braces", template),
                ));
            }
        }
    }
}

// ─── V-006 ──────────────────────────────────────────────────────────────────

fn v006_response_keys(doc: &Document, errors: &mut Vec<ValidationError>) {
    for info in collect_operations(doc) {
        if let Some(responses) = &info.operation.responses {
            for code in responses.keys() {
                if StatusKey::parse(code).is_none() {
                    errors.push(error(
                        "V-006",
                        format!("{}.responses.{}", info.path_prefix, code),
                        format!(
                            "response key must be a status code, a class like '4XX', or 'default', got '{}'",
                            code
                        ),
                    ));
                }
            }
        }
    }
}

// ─── V-007 ──────────────────────────────────────────────────────────────────

fn v007_parameter_location(doc: &Document, errors: &mut Vec<ValidationError>) {
    for (param, path) in collect_parameters(doc) {
        if !PARAMETER_LOCATIONS.contains(&param.location.as_str()) {
            errors.push(error(
                "V-007",
                format!("{}.in", path),
                format!(
                    "parameter 'in' must be one of {}, got '{}'",
                    PARAMETER_LOCATIONS.join(", "),
                    param.location
                ),
            ));
        }
    }
}

// ─── V-008 ──────────────────────────────────────────────────────────────────

fn v008_path_parameters_required(doc: &Document, errors: &mut Vec<ValidationError>) {
    for (param, path) in collect_parameters(doc) {
        if param.location == "path" && param.required != Some(true) {
            errors.push(error(
                "V-008",
                format!("{}.required", path),
                format!("path parameter '{}' must set required: true", param.name),
            ));
        }
    }
}

// ─── V-009 ──────────────────────────────────────────────────────────────────

fn v009_security_scheme_type(doc: &Document, errors: &mut Vec<ValidationError>) {
    let schemes = doc
        .components
        .as_ref()
        .and_then(|c| c.security_schemes.as_ref());
    if let Some(schemes) = schemes {
        for (name, scheme) in schemes {
            if lookup_scheme(&scheme.scheme_type).is_none() {
                errors.push(error(
                    "V-009",
                    format!("components.securitySchemes.{}.type", name),
                    format!("unknown security scheme type: '{}'", scheme.scheme_type),
                ));
            }
        }
    }
}

// ─── V-010 ──────────────────────────────────────────────────────────────────

fn v010_unique_operation_ids(doc: &Document, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for info in collect_operations(doc) {
        if let Some(id) = &info.operation.operation_id
            && !seen.insert(id.clone())
        {
            errors.push(error(
                "V-010",
                format!("{}.operationId", info.path_prefix),
                format!("duplicate operationId: {}", id),
            ));
        }
    }
}

// ─── V-011 ──────────────────────────────────────────────────────────────────

fn v011_unique_tag_names(doc: &Document, errors: &mut Vec<ValidationError>) {
    if let Some(tags) = &doc.tags {
        let mut seen = HashSet::new();
        for (i, tag) in tags.iter().enumerate() {
            if !seen.insert(tag.name.as_str()) {
                errors.push(error(
                    "V-011",
                    format!("tags[{}].name", i),
                    format!("duplicate tag name: {}", tag.name),
                ));
            }
        }
    }
}

// ─── V-012 ──────────────────────────────────────────────────────────────────

fn v012_server_urls(doc: &Document, errors: &mut Vec<ValidationError>) {
    let mut check = |servers: &Option<Vec<Server>>, prefix: &str| {
        if let Some(servers) = servers {
            for (i, server) in servers.iter().enumerate() {
                if server.url.trim().is_empty() {
                    errors.push(error(
                        "V-012",
                        format!("{}servers[{}].url", prefix, i),
                        "server url must not be empty",
                    ));
                }
            }
        }
    };

    check(&doc.servers, "");
    if let Some(paths) = &doc.paths {
        for (template, item) in paths {
            check(&item.servers, &format!("paths.{}.", template));
        }
    }
    for info in collect_operations(doc) {
        check(&info.operation.servers, &format!("{}.", info.path_prefix));
    }
}

// ─── W-001 ──────────────────────────────────────────────────────────────────

fn w001_no_paths(doc: &Document, warnings: &mut Vec<Diagnostic>) {
    let has_paths = doc.paths.as_ref().is_some_and(|p| !p.is_empty());
    let has_webhooks = doc.webhooks.as_ref().is_some_and(|w| !w.is_empty());
    if !has_paths && !has_webhooks {
        warnings.push(Diagnostic {
            severity: DiagnosticSeverity::Warning,
            code: "W-001".to_string(),
            path: Some("paths".to_string()),
            message: "document declares no paths; most rules have nothing to score".to_string(),
        });
    }
}
