use serde_json::Value;

use crate::error::{ParseError, ParseErrorKind};
use crate::resolve::resolve_references;
use crate::types::{Document, Map, PathItem};

/// Parse YAML or JSON text into a typed, reference-free Document.
///
/// Performs deserialization, local `$ref` resolution and type mapping only.
/// Does NOT check the document against the OpenAPI rules; see
/// [`validate`](crate::validate::validate).
pub fn parse(input: &str) -> Result<Document, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::new(ParseErrorKind::Syntax, "empty input"));
    }

    // Check for multi-document YAML (multiple --- markers)
    check_multi_document(input)?;

    // Parse to serde_json::Value first so references can be resolved
    // before the typed mapping.
    let value: Value = serde_saphyr::from_str(input).map_err(|e| {
        let msg = e.to_string();
        ParseError::new(classify_saphyr_error(&msg), msg)
    })?;

    if !value.is_object() {
        return Err(ParseError::new(
            ParseErrorKind::TypeMismatch,
            "document root must be a mapping",
        ));
    }

    let resolved = resolve_references(&value)?;

    let doc: Document = serde_json::from_value(resolved).map_err(|e| {
        let msg = e.to_string();
        ParseError::new(classify_json_error(&msg), msg)
    })?;

    // Unknown keys land in the flattened extension maps; only x-* is allowed.
    validate_extension_keys(&doc)?;

    Ok(doc)
}

/// Validate that all extension (flatten) fields start with "x-".
fn validate_extension_keys(doc: &Document) -> Result<(), ParseError> {
    check_extensions(&doc.extensions, "")?;

    if let Some(paths) = &doc.paths {
        check_path_items(paths, "paths")?;
    }
    if let Some(webhooks) = &doc.webhooks {
        check_path_items(webhooks, "webhooks")?;
    }
    if let Some(components) = &doc.components {
        if let Some(responses) = &components.responses {
            for (name, response) in responses {
                check_extensions(
                    &response.extensions,
                    &format!("components.responses.{}", name),
                )?;
            }
        }
        if let Some(path_items) = &components.path_items {
            check_path_items(path_items, "components.pathItems")?;
        }
    }

    Ok(())
}

fn check_path_items(items: &Map<PathItem>, prefix: &str) -> Result<(), ParseError> {
    for (template, item) in items {
        let item_path = format!("{}.{}", prefix, template);
        check_extensions(&item.extensions, &item_path)?;

        for (method, operation) in item.operations() {
            let op_path = format!("{}.{}", item_path, method);
            check_extensions(&operation.extensions, &op_path)?;

            if let Some(responses) = &operation.responses {
                for (code, response) in responses {
                    check_extensions(
                        &response.extensions,
                        &format!("{}.responses.{}", op_path, code),
                    )?;
                }
            }
        }
    }
    Ok(())
}

fn check_extensions(extensions: &Map<Value>, path: &str) -> Result<(), ParseError> {
    for key in extensions.keys() {
        if !key.starts_with("x-") {
            let (location, field_path) = if path.is_empty() {
                ("the document root".to_string(), key.clone())
            } else {
                (path.to_string(), format!("{}.{}", path, key))
            };
            return Err(ParseError::new(
                ParseErrorKind::UnknownField,
                format!(
                    "unknown field '{}' at {} (extension fields must start with 'x-')",
                    key, location
                ),
            )
            .at(field_path));
        }
    }
    Ok(())
}

/// Check for multiple YAML documents (--- separator).
/// Only matches `---` at column 0 to avoid false positives inside block scalars.
fn check_multi_document(input: &str) -> Result<(), ParseError> {
    let mut doc_count = 0;
    for line in input.lines() {
        if line.starts_with("---") && line[3..].trim().is_empty() {
            doc_count += 1;
            if doc_count > 1 {
                return Err(ParseError::new(
                    ParseErrorKind::Syntax,
                    "multi-document YAML is not supported",
                ));
            }
        }
    }
    Ok(())
}

fn classify_saphyr_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("invalid type") || lower.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}

fn classify_json_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown field") || lower.contains("unknown variant") {
        ParseErrorKind::UnknownField
    } else {
        ParseErrorKind::TypeMismatch
    }
}
