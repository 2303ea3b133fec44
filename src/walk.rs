//! Single-pass, path-tagged document walker.
//!
//! At every node the extractors run in a fixed order before recursion:
//! description, examples, misc, paths, response codes, schemas, security.
//! A node may feed several buckets. The security extractor decides whether
//! recursion continues below the node.

use tracing::debug;

use crate::config::ScoringConfig;
use crate::enums::HttpMethod;
use crate::node::Node;
use crate::parsed::{NamedRef, ParsedSpecification, Path};
use crate::types::{AdditionalProperties, Document, Schema};

/// Whether the walker recurses below the current node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Descend {
    Continue,
    Stop,
}

/// Walk a document once and collect every fact the subscorers consume.
pub fn walk<'a>(doc: &'a Document, config: &ScoringConfig) -> ParsedSpecification<'a> {
    let mut walker = Walker {
        config,
        path: Vec::new(),
        facts: ParsedSpecification::default(),
    };
    walker.visit(Node::Document(doc));

    debug!(
        facts = walker.facts.fact_count(),
        paths = walker.facts.paths.path_to_operations.len(),
        responses = walker.facts.response_codes.responses.len(),
        schemes = walker.facts.security.schemes.len(),
        "walked document"
    );
    walker.facts
}

struct Walker<'a, 'c> {
    config: &'c ScoringConfig,
    path: Path,
    facts: ParsedSpecification<'a>,
}

impl<'a> Walker<'a, '_> {
    fn visit(&mut self, node: Node<'a>) {
        self.extract_description(&node);
        self.extract_examples(&node);
        self.extract_misc(&node);
        self.extract_paths(&node);
        self.extract_response_codes(&node);
        self.extract_schemas(&node);
        if self.extract_security(&node) == Descend::Stop {
            return;
        }

        for (segment, child) in node.into_children() {
            self.path.push(segment.into_owned());
            self.visit(child);
            self.path.pop();
        }
    }

    fn last_segment(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    fn first_segment(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    /// True when the path is `paths -> {template} -> {major method} -> ...`.
    fn under_major_operation(&self) -> bool {
        self.path.len() > 2
            && self.path[0] == "paths"
            && HttpMethod::from_keyword(&self.path[2])
                .is_some_and(|method| self.config.is_major_method(method))
    }

    // ─── Extractors ─────────────────────────────────────────────────────────

    fn extract_description(&mut self, node: &Node<'a>) {
        let description = match node {
            Node::Operation(op) => &op.description,
            Node::Parameter(param) => &param.description,
            Node::RequestBody(body) => &body.description,
            Node::Response(response) => &response.description,
            _ => return,
        };

        let facts = &mut self.facts.descriptions;
        match description {
            None => facts.missing_descriptions.push(self.path.clone()),
            Some(text) if text.chars().count() < self.config.description_min_length => {
                facts.short_descriptions.push(self.path.clone())
            }
            Some(_) => {}
        }
    }

    fn extract_examples(&mut self, node: &Node<'a>) {
        if !self.under_major_operation() {
            return;
        }
        match *node {
            Node::RequestBody(body) => self
                .facts
                .examples
                .request_bodies
                .push((self.path.clone(), body)),
            Node::Response(response) => self
                .facts
                .examples
                .responses
                .push((self.path.clone(), response)),
            _ => {}
        }
    }

    fn extract_misc(&mut self, node: &Node<'a>) {
        match node {
            Node::Tag(tag) => {
                let tag_ref = NamedRef::new(tag.name.clone(), self.path.clone());
                self.facts.misc.tags_defined.push(tag_ref);
            }
            Node::Server(server) => self.facts.misc.servers_defined.push(*server),
            Node::PathItems(items) if self.last_segment() == Some("paths") => {
                if let Some(first) = items.keys().next() {
                    let defined = first.trim_start_matches('/').to_string();
                    self.facts.misc.paths_defined.push(defined);
                }
            }
            Node::Seq(items) if self.is_operation_tag_list() => {
                for item in items {
                    if let Node::Str(name) = item {
                        let tag_ref = NamedRef::new(*name, self.path.clone());
                        self.facts.misc.tags_from_operations.push(tag_ref);
                    }
                }
            }
            _ => {}
        }
    }

    fn is_operation_tag_list(&self) -> bool {
        let len = self.path.len();
        len > 2
            && self.path[len - 1] == "tags"
            && HttpMethod::from_keyword(&self.path[len - 2]).is_some()
    }

    fn extract_paths(&mut self, node: &Node<'a>) {
        if let Node::PathItems(items) = node
            && self.last_segment() == Some("paths")
        {
            for (template, item) in items.iter() {
                let methods = item.operations().into_iter().map(|(m, _)| m).collect();
                self.facts
                    .paths
                    .path_to_operations
                    .insert(template.clone(), methods);
            }
        }
    }

    fn extract_response_codes(&mut self, node: &Node<'a>) {
        match *node {
            Node::Operation(op)
                if op.responses.is_none()
                    && self
                        .last_segment()
                        .is_some_and(|s| HttpMethod::from_keyword(s).is_some()) =>
            {
                self.facts
                    .response_codes
                    .missing_responses
                    .push(self.path.clone());
            }
            Node::Response(response) if self.first_segment() == Some("paths") => {
                self.facts
                    .response_codes
                    .responses
                    .push((self.path.clone(), response));
            }
            _ => {}
        }
    }

    fn extract_schemas(&mut self, node: &Node<'a>) {
        match node {
            Node::Schema(schema) if is_free_form(schema) => {
                self.facts.schemas.free_form_schemas.push(self.path.clone());
            }
            Node::MediaType(media) if media.schema.is_none() => {
                self.facts.schemas.missing_schemas.push(self.path.clone());
            }
            _ => {}
        }
    }

    fn extract_security(&mut self, node: &Node<'a>) -> Descend {
        match *node {
            Node::SecurityScheme(scheme) => {
                let name = self.last_segment().unwrap_or_default().to_string();
                let facts = &mut self.facts.security;
                facts.schemes.push((self.path.clone(), scheme));
                facts
                    .defined_schemes
                    .push(NamedRef::new(name, self.path.clone()));
                Descend::Stop
            }
            Node::SecurityRequirements(requirements) => {
                let root = self.first_segment() == Some("security");
                let operation = !root && self.last_segment() == Some("security");
                if !root && !operation {
                    return Descend::Stop;
                }

                let mut found = Vec::new();
                for requirement in requirements {
                    for name in requirement.keys() {
                        let mut path = self.path.clone();
                        path.push(name.clone());
                        found.push(NamedRef::new(name.clone(), path));
                    }
                }

                let facts = &mut self.facts.security;
                if root {
                    facts.referenced_schemes.extend(found);
                } else {
                    facts.operation_referenced_schemes.extend(found);
                }
                Descend::Stop
            }
            _ => Descend::Continue,
        }
    }
}

/// An object schema with no `properties` whose extra properties are
/// unconstrained (`additionalProperties` absent or `true`).
pub fn is_free_form(schema: &Schema) -> bool {
    schema.is_type("object")
        && schema.properties.is_none()
        && matches!(
            schema.additional_properties,
            None | Some(AdditionalProperties::Bool(true))
        )
}
