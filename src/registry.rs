use crate::types::{OAuthFlow, SecurityScheme};

/// Fields a security scheme of a given `type` must declare.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemeEntry {
    pub scheme_type: &'static str,
    pub required: &'static [&'static str],
}

/// Required fields per security scheme type.
pub static SCHEME_REGISTRY: &[SchemeEntry] = &[
    SchemeEntry {
        scheme_type: "apiKey",
        required: &["name", "in"],
    },
    SchemeEntry {
        scheme_type: "http",
        required: &["scheme"],
    },
    SchemeEntry {
        scheme_type: "oauth2",
        required: &["flows"],
    },
    SchemeEntry {
        scheme_type: "openIdConnect",
        required: &["openIdConnectUrl"],
    },
    SchemeEntry {
        scheme_type: "mutualTLS",
        required: &[],
    },
];

/// Fields an OAuth flow of a given kind must declare.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowEntry {
    pub flow: &'static str,
    pub required: &'static [&'static str],
}

/// Required fields per OAuth flow, in the order flows are checked.
pub static FLOW_REGISTRY: &[FlowEntry] = &[
    FlowEntry {
        flow: "implicit",
        required: &["authorizationUrl", "scopes"],
    },
    FlowEntry {
        flow: "password",
        required: &["tokenUrl", "scopes"],
    },
    FlowEntry {
        flow: "clientCredentials",
        required: &["tokenUrl", "scopes"],
    },
    FlowEntry {
        flow: "authorizationCode",
        required: &["authorizationUrl", "tokenUrl", "scopes"],
    },
];

pub fn lookup_scheme(scheme_type: &str) -> Option<&'static SchemeEntry> {
    SCHEME_REGISTRY.iter().find(|e| e.scheme_type == scheme_type)
}

pub fn lookup_flow(flow: &str) -> Option<&'static FlowEntry> {
    FLOW_REGISTRY.iter().find(|e| e.flow == flow)
}

/// Every flow name, for the "declare at least one flow" finding.
pub fn flow_names() -> Vec<&'static str> {
    FLOW_REGISTRY.iter().map(|e| e.flow).collect()
}

/// Whether a scheme declares `field` with a non-empty value.
pub fn scheme_has(scheme: &SecurityScheme, field: &str) -> bool {
    match field {
        "name" => non_empty(&scheme.name),
        "in" => non_empty(&scheme.location),
        "scheme" => non_empty(&scheme.scheme),
        "bearerFormat" => non_empty(&scheme.bearer_format),
        "flows" => scheme.flows.is_some(),
        "openIdConnectUrl" => non_empty(&scheme.open_id_connect_url),
        _ => false,
    }
}

/// Whether a flow declares `field` with a non-empty value.
pub fn flow_has(flow: &OAuthFlow, field: &str) -> bool {
    match field {
        "authorizationUrl" => non_empty(&flow.authorization_url),
        "tokenUrl" => non_empty(&flow.token_url),
        "refreshUrl" => non_empty(&flow.refresh_url),
        "scopes" => flow.scopes.as_ref().is_some_and(|s| !s.is_empty()),
        _ => false,
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}
