//! Borrowed, type-tagged view over the document model.
//!
//! A [`Node`] is what the walker dispatches on. Typed objects get their own
//! variant; keyed collections become [`Node::Map`], lists [`Node::Seq`], and
//! free-form payloads stay [`Node::Value`]. Two collections keep a dedicated
//! variant because extractors recognise them by kind: the path-item mapping
//! and the security-requirement list.

use std::borrow::Cow;

use serde_json::Value;

use crate::types::*;

/// One child of a node: the path segment that reaches it, and the node.
pub type Child<'a> = (Cow<'a, str>, Node<'a>);

#[derive(Clone, Debug)]
pub enum Node<'a> {
    Document(&'a Document),
    Info(&'a Info),
    Contact(&'a Contact),
    License(&'a License),
    Server(&'a Server),
    ServerVariable(&'a ServerVariable),
    PathItem(&'a PathItem),
    Operation(&'a Operation),
    Parameter(&'a Parameter),
    RequestBody(&'a RequestBody),
    MediaType(&'a MediaType),
    Encoding(&'a Encoding),
    Header(&'a Header),
    Response(&'a Response),
    Link(&'a Link),
    Example(&'a Example),
    Components(&'a Components),
    SecurityScheme(&'a SecurityScheme),
    OAuthFlows(&'a OAuthFlows),
    OAuthFlow(&'a OAuthFlow),
    Tag(&'a Tag),
    ExternalDocs(&'a ExternalDocumentation),
    Schema(&'a Schema),
    Discriminator(&'a Discriminator),
    Xml(&'a Xml),
    /// Path template → path item.
    PathItems(&'a Map<PathItem>),
    SecurityRequirements(&'a [SecurityRequirement]),
    Map(Vec<Child<'a>>),
    Seq(Vec<Node<'a>>),
    Value(&'a Value),
    Str(&'a str),
    Bool(bool),
    Number(f64),
}

impl<'a> Node<'a> {
    /// Consume the node and return its children in declaration order.
    ///
    /// Typed objects yield each present field under its OpenAPI name;
    /// mappings yield each value under its key; sequences yield each element
    /// under its index. Scalars have no children. Extension fields are not
    /// declared fields and are never yielded.
    pub fn into_children(self) -> Vec<Child<'a>> {
        match self {
            Node::Document(d) => Fields::new()
                .str("openapi", &d.openapi)
                .node("info", Some(Node::Info(&d.info)))
                .text("jsonSchemaDialect", &d.json_schema_dialect)
                .seq("servers", &d.servers, Node::Server)
                .node("paths", d.paths.as_ref().map(Node::PathItems))
                .node("webhooks", d.webhooks.as_ref().map(Node::PathItems))
                .node("components", d.components.as_ref().map(Node::Components))
                .node(
                    "security",
                    d.security.as_deref().map(Node::SecurityRequirements),
                )
                .seq("tags", &d.tags, Node::Tag)
                .node("externalDocs", d.external_docs.as_ref().map(Node::ExternalDocs))
                .build(),
            Node::Info(i) => Fields::new()
                .str("title", &i.title)
                .text("summary", &i.summary)
                .text("description", &i.description)
                .text("termsOfService", &i.terms_of_service)
                .node("contact", i.contact.as_ref().map(Node::Contact))
                .node("license", i.license.as_ref().map(Node::License))
                .str("version", &i.version)
                .build(),
            Node::Contact(c) => Fields::new()
                .text("name", &c.name)
                .text("url", &c.url)
                .text("email", &c.email)
                .build(),
            Node::License(l) => Fields::new()
                .str("name", &l.name)
                .text("identifier", &l.identifier)
                .text("url", &l.url)
                .build(),
            Node::Server(s) => Fields::new()
                .str("url", &s.url)
                .text("description", &s.description)
                .map("variables", &s.variables, Node::ServerVariable)
                .build(),
            Node::ServerVariable(v) => Fields::new()
                .node(
                    "enum",
                    v.enum_values
                        .as_ref()
                        .map(|values| seq_node(values, |s| Node::Str(s))),
                )
                .str("default", &v.default)
                .text("description", &v.description)
                .build(),
            Node::PathItem(p) => Fields::new()
                .text("summary", &p.summary)
                .text("description", &p.description)
                .node("get", p.get.as_ref().map(Node::Operation))
                .node("put", p.put.as_ref().map(Node::Operation))
                .node("post", p.post.as_ref().map(Node::Operation))
                .node("delete", p.delete.as_ref().map(Node::Operation))
                .node("options", p.options.as_ref().map(Node::Operation))
                .node("head", p.head.as_ref().map(Node::Operation))
                .node("patch", p.patch.as_ref().map(Node::Operation))
                .node("trace", p.trace.as_ref().map(Node::Operation))
                .seq("servers", &p.servers, Node::Server)
                .seq("parameters", &p.parameters, Node::Parameter)
                .build(),
            Node::Operation(o) => Fields::new()
                .node(
                    "tags",
                    o.tags.as_ref().map(|tags| seq_node(tags, |s| Node::Str(s))),
                )
                .text("summary", &o.summary)
                .text("description", &o.description)
                .node("externalDocs", o.external_docs.as_ref().map(Node::ExternalDocs))
                .text("operationId", &o.operation_id)
                .seq("parameters", &o.parameters, Node::Parameter)
                .node("requestBody", o.request_body.as_ref().map(Node::RequestBody))
                .map("responses", &o.responses, Node::Response)
                .map("callbacks", &o.callbacks, Node::PathItems)
                .flag("deprecated", o.deprecated)
                .node(
                    "security",
                    o.security.as_deref().map(Node::SecurityRequirements),
                )
                .seq("servers", &o.servers, Node::Server)
                .build(),
            Node::Parameter(p) => Fields::new()
                .str("name", &p.name)
                .str("in", &p.location)
                .text("description", &p.description)
                .flag("required", p.required)
                .flag("deprecated", p.deprecated)
                .flag("allowEmptyValue", p.allow_empty_value)
                .text("style", &p.style)
                .flag("explode", p.explode)
                .flag("allowReserved", p.allow_reserved)
                .node("schema", p.schema.as_ref().map(Node::Schema))
                .value("example", &p.example)
                .map("examples", &p.examples, Node::Example)
                .map("content", &p.content, Node::MediaType)
                .build(),
            Node::RequestBody(r) => Fields::new()
                .text("description", &r.description)
                .node("content", Some(map_node(&r.content, Node::MediaType)))
                .flag("required", r.required)
                .build(),
            Node::MediaType(m) => Fields::new()
                .node("schema", m.schema.as_ref().map(Node::Schema))
                .value("example", &m.example)
                .map("examples", &m.examples, Node::Example)
                .map("encoding", &m.encoding, Node::Encoding)
                .build(),
            Node::Encoding(e) => Fields::new()
                .text("contentType", &e.content_type)
                .map("headers", &e.headers, Node::Header)
                .text("style", &e.style)
                .flag("explode", e.explode)
                .flag("allowReserved", e.allow_reserved)
                .build(),
            Node::Header(h) => Fields::new()
                .text("description", &h.description)
                .flag("required", h.required)
                .flag("deprecated", h.deprecated)
                .text("style", &h.style)
                .flag("explode", h.explode)
                .node("schema", h.schema.as_ref().map(Node::Schema))
                .value("example", &h.example)
                .map("examples", &h.examples, Node::Example)
                .map("content", &h.content, Node::MediaType)
                .build(),
            Node::Response(r) => Fields::new()
                .text("description", &r.description)
                .map("headers", &r.headers, Node::Header)
                .map("content", &r.content, Node::MediaType)
                .map("links", &r.links, Node::Link)
                .build(),
            Node::Link(l) => Fields::new()
                .text("operationRef", &l.operation_ref)
                .text("operationId", &l.operation_id)
                .map("parameters", &l.parameters, Node::Value)
                .value("requestBody", &l.request_body)
                .text("description", &l.description)
                .node("server", l.server.as_ref().map(Node::Server))
                .build(),
            Node::Example(e) => Fields::new()
                .text("summary", &e.summary)
                .text("description", &e.description)
                .value("value", &e.value)
                .text("externalValue", &e.external_value)
                .build(),
            Node::Components(c) => Fields::new()
                .map("schemas", &c.schemas, Node::Schema)
                .map("responses", &c.responses, Node::Response)
                .map("parameters", &c.parameters, Node::Parameter)
                .map("examples", &c.examples, Node::Example)
                .map("requestBodies", &c.request_bodies, Node::RequestBody)
                .map("headers", &c.headers, Node::Header)
                .map("securitySchemes", &c.security_schemes, Node::SecurityScheme)
                .map("links", &c.links, Node::Link)
                .map("callbacks", &c.callbacks, Node::PathItems)
                .node("pathItems", c.path_items.as_ref().map(Node::PathItems))
                .build(),
            Node::SecurityScheme(s) => Fields::new()
                .str("type", &s.scheme_type)
                .text("description", &s.description)
                .text("name", &s.name)
                .text("in", &s.location)
                .text("scheme", &s.scheme)
                .text("bearerFormat", &s.bearer_format)
                .node("flows", s.flows.as_ref().map(Node::OAuthFlows))
                .text("openIdConnectUrl", &s.open_id_connect_url)
                .build(),
            Node::OAuthFlows(f) => f
                .declared()
                .into_iter()
                .map(|(name, flow)| (Cow::Borrowed(name), Node::OAuthFlow(flow)))
                .collect(),
            Node::OAuthFlow(f) => Fields::new()
                .text("authorizationUrl", &f.authorization_url)
                .text("tokenUrl", &f.token_url)
                .text("refreshUrl", &f.refresh_url)
                .map("scopes", &f.scopes, |s| Node::Str(s))
                .build(),
            Node::Tag(t) => Fields::new()
                .str("name", &t.name)
                .text("description", &t.description)
                .node("externalDocs", t.external_docs.as_ref().map(Node::ExternalDocs))
                .build(),
            Node::ExternalDocs(e) => Fields::new()
                .text("description", &e.description)
                .str("url", &e.url)
                .build(),
            Node::Schema(s) => schema_children(s),
            Node::Discriminator(d) => Fields::new()
                .str("propertyName", &d.property_name)
                .map("mapping", &d.mapping, |s| Node::Str(s))
                .build(),
            Node::Xml(x) => Fields::new()
                .text("name", &x.name)
                .text("namespace", &x.namespace)
                .text("prefix", &x.prefix)
                .flag("attribute", x.attribute)
                .flag("wrapped", x.wrapped)
                .build(),
            Node::PathItems(items) => items
                .iter()
                .map(|(template, item)| (Cow::Borrowed(template.as_str()), Node::PathItem(item)))
                .collect(),
            Node::SecurityRequirements(list) => list
                .iter()
                .enumerate()
                .map(|(i, requirement)| {
                    let scopes = requirement
                        .iter()
                        .map(|(name, scopes)| {
                            (
                                Cow::Borrowed(name.as_str()),
                                seq_node(scopes, |s| Node::Str(s)),
                            )
                        })
                        .collect();
                    (Cow::Owned(i.to_string()), Node::Map(scopes))
                })
                .collect(),
            Node::Map(children) => children,
            Node::Seq(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, node)| (Cow::Owned(i.to_string()), node))
                .collect(),
            Node::Value(value) => match value {
                Value::Object(object) => object
                    .iter()
                    .map(|(key, v)| (Cow::Borrowed(key.as_str()), Node::Value(v)))
                    .collect(),
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Cow::Owned(i.to_string()), Node::Value(v)))
                    .collect(),
                _ => Vec::new(),
            },
            Node::Str(_) | Node::Bool(_) | Node::Number(_) => Vec::new(),
        }
    }
}

fn schema_children(s: &Schema) -> Vec<Child<'_>> {
    let schema_type = s.schema_type.as_ref().map(|t| match t {
        SchemaType::Single(name) => Node::Str(name),
        SchemaType::Multiple(names) => seq_node(names, |n| Node::Str(n)),
    });
    let additional = s.additional_properties.as_ref().map(|a| match a {
        AdditionalProperties::Bool(b) => Node::Bool(*b),
        AdditionalProperties::Schema(schema) => Node::Schema(schema),
    });

    Fields::new()
        .text("title", &s.title)
        .text("description", &s.description)
        .node("type", schema_type)
        .text("format", &s.format)
        .map("properties", &s.properties, Node::Schema)
        .node("additionalProperties", additional)
        .node("items", s.items.as_deref().map(Node::Schema))
        .node(
            "required",
            s.required.as_ref().map(|r| seq_node(r, |n| Node::Str(n))),
        )
        .seq("enum", &s.enum_values, Node::Value)
        .seq("allOf", &s.all_of, Node::Schema)
        .seq("oneOf", &s.one_of, Node::Schema)
        .seq("anyOf", &s.any_of, Node::Schema)
        .node("not", s.not.as_deref().map(Node::Schema))
        .flag("nullable", s.nullable)
        .flag("readOnly", s.read_only)
        .flag("writeOnly", s.write_only)
        .flag("deprecated", s.deprecated)
        .value("default", &s.default)
        .value("example", &s.example)
        .seq("examples", &s.examples, Node::Value)
        .number("minimum", s.minimum)
        .number("maximum", s.maximum)
        .number("minLength", s.min_length.map(|n| n as f64))
        .number("maxLength", s.max_length.map(|n| n as f64))
        .number("minItems", s.min_items.map(|n| n as f64))
        .number("maxItems", s.max_items.map(|n| n as f64))
        .text("pattern", &s.pattern)
        .node("discriminator", s.discriminator.as_ref().map(Node::Discriminator))
        .node("xml", s.xml.as_ref().map(Node::Xml))
        .node("externalDocs", s.external_docs.as_ref().map(Node::ExternalDocs))
        .build()
}

fn map_node<'a, T>(map: &'a Map<T>, wrap: impl Fn(&'a T) -> Node<'a>) -> Node<'a> {
    Node::Map(
        map.iter()
            .map(|(key, value)| (Cow::Borrowed(key.as_str()), wrap(value)))
            .collect(),
    )
}

fn seq_node<'a, T>(items: &'a [T], wrap: impl Fn(&'a T) -> Node<'a>) -> Node<'a> {
    Node::Seq(items.iter().map(wrap).collect())
}

// ─── Field collection ───────────────────────────────────────────────────────

/// Collects the present fields of a typed object.
struct Fields<'a> {
    out: Vec<Child<'a>>,
}

impl<'a> Fields<'a> {
    fn new() -> Self {
        Fields { out: Vec::new() }
    }

    fn node(mut self, name: &'static str, node: Option<Node<'a>>) -> Self {
        if let Some(node) = node {
            self.out.push((Cow::Borrowed(name), node));
        }
        self
    }

    fn str(self, name: &'static str, value: &'a str) -> Self {
        self.node(name, Some(Node::Str(value)))
    }

    fn text(self, name: &'static str, value: &'a Option<String>) -> Self {
        self.node(name, value.as_deref().map(Node::Str))
    }

    fn flag(self, name: &'static str, value: Option<bool>) -> Self {
        self.node(name, value.map(Node::Bool))
    }

    fn number(self, name: &'static str, value: Option<f64>) -> Self {
        self.node(name, value.map(Node::Number))
    }

    fn value(self, name: &'static str, value: &'a Option<Value>) -> Self {
        self.node(name, value.as_ref().map(Node::Value))
    }

    fn map<T>(
        self,
        name: &'static str,
        value: &'a Option<Map<T>>,
        wrap: impl Fn(&'a T) -> Node<'a>,
    ) -> Self {
        self.node(name, value.as_ref().map(|m| map_node(m, wrap)))
    }

    fn seq<T>(
        self,
        name: &'static str,
        value: &'a Option<Vec<T>>,
        wrap: impl Fn(&'a T) -> Node<'a>,
    ) -> Self {
        self.node(name, value.as_deref().map(|items| seq_node(items, wrap)))
    }

    fn build(self) -> Vec<Child<'a>> {
        self.out
    }
}
