//! Typed OpenAPI 3.x document model.
//!
//! The model is deserialized from an already reference-resolved JSON value, so
//! no `Reference` objects appear in it. Optional fields are `Option` even where
//! the OpenAPI grammar makes them required when scoring needs to see their
//! absence (security scheme fields, OAuth flow URLs).

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::enums::HttpMethod;

/// Map type used for every keyed collection; keeps document order.
pub type Map<T> = IndexMap<String, T>;

/// A security requirement: scheme name → required scopes.
pub type SecurityRequirement = Map<Vec<String>>;

/// A callback: runtime expression → path item.
pub type Callback = Map<PathItem>;

// ─── Document ───────────────────────────────────────────────────────────────

/// The root of an OpenAPI document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub openapi: String,
    pub info: Info,
    pub json_schema_dialect: Option<String>,
    pub servers: Option<Vec<Server>>,
    pub paths: Option<Map<PathItem>>,
    pub webhooks: Option<Map<PathItem>>,
    pub components: Option<Components>,
    pub security: Option<Vec<SecurityRequirement>>,
    pub tags: Option<Vec<Tag>>,
    pub external_docs: Option<ExternalDocumentation>,
    /// Extension fields (x-* prefixed).
    #[serde(flatten)]
    pub extensions: Map<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<License>,
    pub version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Contact {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct License {
    pub name: String,
    pub identifier: Option<String>,
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
    pub variables: Option<Map<ServerVariable>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ServerVariable {
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    pub default: String,
    pub description: Option<String>,
}

// ─── Paths ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
    pub servers: Option<Vec<Server>>,
    pub parameters: Option<Vec<Parameter>>,
    /// Extension fields (x-* prefixed).
    #[serde(flatten)]
    pub extensions: Map<Value>,
}

impl PathItem {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Defined operations in canonical method order.
    pub fn operations(&self) -> Vec<(HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocumentation>,
    pub operation_id: Option<String>,
    pub parameters: Option<Vec<Parameter>>,
    pub request_body: Option<RequestBody>,
    pub responses: Option<Map<Response>>,
    pub callbacks: Option<Map<Callback>>,
    pub deprecated: Option<bool>,
    pub security: Option<Vec<SecurityRequirement>>,
    pub servers: Option<Vec<Server>>,
    /// Extension fields (x-* prefixed).
    #[serde(flatten)]
    pub extensions: Map<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub deprecated: Option<bool>,
    pub allow_empty_value: Option<bool>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub allow_reserved: Option<bool>,
    pub schema: Option<Schema>,
    pub example: Option<Value>,
    pub examples: Option<Map<Example>>,
    pub content: Option<Map<MediaType>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    pub description: Option<String>,
    #[serde(default)]
    pub content: Map<MediaType>,
    pub required: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
    pub example: Option<Value>,
    pub examples: Option<Map<Example>>,
    pub encoding: Option<Map<Encoding>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    pub content_type: Option<String>,
    pub headers: Option<Map<Header>>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub allow_reserved: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub description: Option<String>,
    pub required: Option<bool>,
    pub deprecated: Option<bool>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub schema: Option<Schema>,
    pub example: Option<Value>,
    pub examples: Option<Map<Example>>,
    pub content: Option<Map<MediaType>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    pub headers: Option<Map<Header>>,
    pub content: Option<Map<MediaType>>,
    pub links: Option<Map<Link>>,
    /// Extension fields (x-* prefixed).
    #[serde(flatten)]
    pub extensions: Map<Value>,
}

impl Response {
    /// A response without a content map, or with an empty one.
    pub fn has_no_content(&self) -> bool {
        self.content.as_ref().is_none_or(|content| content.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub operation_ref: Option<String>,
    pub operation_id: Option<String>,
    pub parameters: Option<Map<Value>>,
    pub request_body: Option<Value>,
    pub description: Option<String>,
    pub server: Option<Server>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub value: Option<Value>,
    pub external_value: Option<String>,
}

// ─── Components ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    pub schemas: Option<Map<Schema>>,
    pub responses: Option<Map<Response>>,
    pub parameters: Option<Map<Parameter>>,
    pub examples: Option<Map<Example>>,
    pub request_bodies: Option<Map<RequestBody>>,
    pub headers: Option<Map<Header>>,
    pub security_schemes: Option<Map<SecurityScheme>>,
    pub links: Option<Map<Link>>,
    pub callbacks: Option<Map<Callback>>,
    pub path_items: Option<Map<PathItem>>,
}

// ─── Security ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    pub description: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "in")]
    pub location: Option<String>,
    pub scheme: Option<String>,
    pub bearer_format: Option<String>,
    pub flows: Option<OAuthFlows>,
    pub open_id_connect_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    pub implicit: Option<OAuthFlow>,
    pub password: Option<OAuthFlow>,
    pub client_credentials: Option<OAuthFlow>,
    pub authorization_code: Option<OAuthFlow>,
}

impl OAuthFlows {
    /// Declared flows paired with their wire names.
    pub fn declared(&self) -> Vec<(&'static str, &OAuthFlow)> {
        [
            ("implicit", self.implicit.as_ref()),
            ("password", self.password.as_ref()),
            ("clientCredentials", self.client_credentials.as_ref()),
            ("authorizationCode", self.authorization_code.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, flow)| flow.map(|f| (name, f)))
        .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
    pub scopes: Option<Map<String>>,
}

// ─── Tags & docs ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocumentation>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExternalDocumentation {
    pub description: Option<String>,
    pub url: String,
}

// ─── Schema ─────────────────────────────────────────────────────────────────

/// JSON Schema `type`: a single name (3.0) or a list of names (3.1).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// `additionalProperties`: a boolean switch or a schema for the extra values.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

/// A schema object. Keywords the scorer never inspects land in `extensions`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    pub format: Option<String>,
    pub properties: Option<Map<Schema>>,
    pub additional_properties: Option<AdditionalProperties>,
    pub items: Option<Box<Schema>>,
    pub required: Option<Vec<String>>,
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    pub all_of: Option<Vec<Schema>>,
    pub one_of: Option<Vec<Schema>>,
    pub any_of: Option<Vec<Schema>>,
    pub not: Option<Box<Schema>>,
    pub nullable: Option<bool>,
    pub read_only: Option<bool>,
    pub write_only: Option<bool>,
    pub deprecated: Option<bool>,
    pub default: Option<Value>,
    pub example: Option<Value>,
    pub examples: Option<Vec<Value>>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub pattern: Option<String>,
    pub discriminator: Option<Discriminator>,
    pub xml: Option<Xml>,
    pub external_docs: Option<ExternalDocumentation>,
    #[serde(flatten)]
    pub extensions: Map<Value>,
}

impl Schema {
    /// True when the declared `type` is exactly the given single name.
    pub fn is_type(&self, name: &str) -> bool {
        matches!(&self.schema_type, Some(SchemaType::Single(t)) if t == name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    pub property_name: String,
    pub mapping: Option<Map<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Xml {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub attribute: Option<bool>,
    pub wrapped: Option<bool>,
}
