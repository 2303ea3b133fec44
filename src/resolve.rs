//! Local `$ref` resolution over the raw JSON value.
//!
//! Every `{"$ref": "#/..."}` object is replaced by a resolved copy of its
//! target. Keys next to `$ref` (such as `description` overrides) are laid
//! over the resolved object. The typed model has no reference type, so any
//! reference left unresolved here is a parse failure.
//!
//! Inlining copies a target at every use site, so chains of shared
//! references can grow exponentially. The number of nodes produced is
//! capped at a multiple of the input's node count.

use serde_json::{Map, Value};

use crate::error::{ParseError, ParseErrorKind};

/// Produced nodes allowed per input node.
const EXPANSION_FACTOR: usize = 32;

/// Budget floor for small documents.
const MIN_EXPANSION_BUDGET: usize = 10_000;

/// Inline every local reference in `root`.
///
/// External references (anything not starting with `#`) are rejected with
/// [`ParseErrorKind::UnresolvedReference`], as are pointers that name no
/// node. A reference reached again while it is being resolved is rejected
/// with [`ParseErrorKind::CyclicReference`]. Expansion that outgrows the
/// input by more than a fixed factor is rejected with
/// [`ParseErrorKind::ReferenceExpansion`].
pub fn resolve_references(root: &Value) -> Result<Value, ParseError> {
    let budget = count_nodes(root)
        .saturating_mul(EXPANSION_FACTOR)
        .max(MIN_EXPANSION_BUDGET);
    let mut resolver = Resolver {
        root,
        active: Vec::new(),
        produced: 0,
        budget,
    };
    resolver.resolve(root, "")
}

struct Resolver<'a> {
    root: &'a Value,
    /// References currently being expanded, outermost first.
    active: Vec<String>,
    /// Nodes emitted so far.
    produced: usize,
    budget: usize,
}

impl<'a> Resolver<'a> {
    fn resolve(&mut self, node: &'a Value, at: &str) -> Result<Value, ParseError> {
        self.produced += 1;
        if self.produced > self.budget {
            return Err(ParseError::new(
                ParseErrorKind::ReferenceExpansion,
                format!(
                    "reference expansion exceeds {} nodes; shared references fan out too far",
                    self.budget
                ),
            )
            .at(if at.is_empty() { "$ref" } else { at }));
        }

        match node {
            Value::Object(map) => match map.get("$ref") {
                Some(Value::String(reference)) => self.expand(reference, map, at),
                _ => {
                    let mut out = Map::with_capacity(map.len());
                    for (key, value) in map {
                        out.insert(key.clone(), self.resolve(value, &child_path(at, key))?);
                    }
                    Ok(Value::Object(out))
                }
            },
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.resolve(item, &format!("{}[{}]", at, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn expand(
        &mut self,
        reference: &str,
        siblings: &'a Map<String, Value>,
        at: &str,
    ) -> Result<Value, ParseError> {
        let location = if at.is_empty() { "$ref" } else { at };
        let Some(pointer) = reference.strip_prefix('#') else {
            return Err(ParseError::new(
                ParseErrorKind::UnresolvedReference,
                format!("external reference '{}' is not supported", reference),
            )
            .at(location));
        };
        if self.active.iter().any(|r| r == reference) {
            return Err(ParseError::new(
                ParseErrorKind::CyclicReference,
                format!(
                    "reference cycle: {} -> {}",
                    self.active.join(" -> "),
                    reference
                ),
            )
            .at(location));
        }
        let Some(target) = self.root.pointer(pointer) else {
            return Err(ParseError::new(
                ParseErrorKind::UnresolvedReference,
                format!("reference '{}' does not point into the document", reference),
            )
            .at(location));
        };

        self.active.push(reference.to_string());
        let resolved = self.resolve(target, at);
        self.active.pop();
        match resolved? {
            Value::Object(mut merged) => {
                for (key, value) in siblings {
                    if key != "$ref" {
                        merged.insert(key.clone(), self.resolve(value, &child_path(at, key))?);
                    }
                }
                Ok(Value::Object(merged))
            }
            other => Ok(other),
        }
    }
}

fn count_nodes(value: &Value) -> usize {
    match value {
        Value::Object(map) => 1 + map.values().map(count_nodes).sum::<usize>(),
        Value::Array(items) => 1 + items.iter().map(count_nodes).sum::<usize>(),
        _ => 1,
    }
}

fn child_path(at: &str, key: &str) -> String {
    if at.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", at, key)
    }
}
