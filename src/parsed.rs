//! Facts extracted by the walker, one bucket per rule category.
//!
//! Every fact keeps the exact [`Path`] it was found at. Buckets are filled in
//! traversal order and never deduplicated.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::enums::HttpMethod;
use crate::types::{RequestBody, Response, SecurityScheme, Server};

/// Field names, map keys and sequence indices from the document root.
pub type Path = Vec<String>;

/// Render a path for humans: `paths -> /pets -> get`.
pub fn path_to_string(path: &[String]) -> String {
    path.join(" -> ")
}

/// A name together with the path it was found at.
///
/// Comparisons between named references go through [`NamedRef::same_name`];
/// two records for the same name found in different places are still
/// distinct facts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedRef {
    pub name: String,
    pub path: Path,
}

impl NamedRef {
    pub fn new(name: impl Into<String>, path: Path) -> Self {
        NamedRef {
            name: name.into(),
            path,
        }
    }

    pub fn same_name(&self, other: &NamedRef) -> bool {
        self.name == other.name
    }

    /// True when some entry of `refs` carries the same name.
    pub fn is_in(&self, refs: &[NamedRef]) -> bool {
        refs.iter().any(|r| r.same_name(self))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DescriptionFacts {
    pub missing_descriptions: Vec<Path>,
    pub short_descriptions: Vec<Path>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExampleFacts<'a> {
    pub request_bodies: Vec<(Path, &'a RequestBody)>,
    pub responses: Vec<(Path, &'a Response)>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MiscFacts<'a> {
    /// Defined path strings with the leading slash stripped.
    pub paths_defined: Vec<String>,
    pub servers_defined: Vec<&'a Server>,
    pub tags_defined: Vec<NamedRef>,
    pub tags_from_operations: Vec<NamedRef>,
    /// Tag names referenced from operations but never declared at the root.
    /// Written once, by the misc subscorer.
    pub undefined_tags: OnceLock<Vec<String>>,
}

impl MiscFacts<'_> {
    /// Derive (on first call) and return the undefined tag names, in
    /// first-reference order without repeats.
    pub fn undefined_tags(&self) -> &[String] {
        self.undefined_tags.get_or_init(|| {
            let mut names: Vec<String> = Vec::new();
            for tag in &self.tags_from_operations {
                if !tag.is_in(&self.tags_defined) && !names.contains(&tag.name) {
                    names.push(tag.name.clone());
                }
            }
            names
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathFacts {
    /// Path template → methods defined on it, in document order.
    pub path_to_operations: IndexMap<String, Vec<HttpMethod>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseCodeFacts<'a> {
    pub responses: Vec<(Path, &'a Response)>,
    pub missing_responses: Vec<Path>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaFacts {
    pub free_form_schemas: Vec<Path>,
    pub missing_schemas: Vec<Path>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SecurityFacts<'a> {
    pub schemes: Vec<(Path, &'a SecurityScheme)>,
    pub defined_schemes: Vec<NamedRef>,
    /// Requirements from the root `security` list.
    pub referenced_schemes: Vec<NamedRef>,
    /// Requirements from operation-level `security` lists.
    pub operation_referenced_schemes: Vec<NamedRef>,
}

/// The walker's output. Borrows from the document it was built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedSpecification<'a> {
    pub descriptions: DescriptionFacts,
    pub examples: ExampleFacts<'a>,
    pub misc: MiscFacts<'a>,
    pub paths: PathFacts,
    pub response_codes: ResponseCodeFacts<'a>,
    pub schemas: SchemaFacts,
    pub security: SecurityFacts<'a>,
}

impl ParsedSpecification<'_> {
    /// Total number of facts across every bucket.
    pub fn fact_count(&self) -> usize {
        self.descriptions.missing_descriptions.len()
            + self.descriptions.short_descriptions.len()
            + self.examples.request_bodies.len()
            + self.examples.responses.len()
            + self.misc.paths_defined.len()
            + self.misc.servers_defined.len()
            + self.misc.tags_defined.len()
            + self.misc.tags_from_operations.len()
            + self.paths.path_to_operations.len()
            + self.response_codes.responses.len()
            + self.response_codes.missing_responses.len()
            + self.schemas.free_form_schemas.len()
            + self.schemas.missing_schemas.len()
            + self.security.schemes.len()
            + self.security.defined_schemes.len()
            + self.security.referenced_schemes.len()
            + self.security.operation_referenced_schemes.len()
    }
}
