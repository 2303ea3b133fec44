//! Lexical primitives over path templates and status-code keys.
//!
//! Shared by the subscorers, the validator and the property tests.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::CodeRange;
use crate::enums::{HttpMethod, NamingConvention};

// ─── Cached regexes ─────────────────────────────────────────────────────────

static TEMPLATE_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]+\}").unwrap());

static VERSION_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v\d+$").unwrap());

static STATUS_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:([1-5][0-9]{2})|([1-5])XX)$").unwrap());

// ─── Path overlap ───────────────────────────────────────────────────────────

/// Stands in for every `{param}` segment when comparing templates.
const PLACEHOLDER: &str = "{}";

fn template_segments(template: &str) -> Vec<String> {
    TEMPLATE_PARAM_RE
        .replace_all(template, PLACEHOLDER)
        .trim_matches('/')
        .split('/')
        .map(str::to_string)
        .collect()
}

/// Whether two path templates can match the same request path.
///
/// Templates overlap when they have the same number of segments and every
/// position is either literally equal or a parameter on either side.
pub fn paths_overlap(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    let left = template_segments(a);
    let right = template_segments(b);
    if left.len() != right.len() {
        return false;
    }

    left.iter()
        .zip(&right)
        .all(|(l, r)| l == r || l == PLACEHOLDER || r == PLACEHOLDER)
}

// ─── Naming ─────────────────────────────────────────────────────────────────

/// Outcome of comparing the separators used by two path templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairNaming {
    /// The convention with more separators across both paths, if any.
    pub majority: Option<NamingConvention>,
    /// False when dashes and underscores are mixed across the pair.
    pub consistent: bool,
}

pub fn compare_naming(a: &str, b: &str) -> PairNaming {
    let count = |c: char| a.matches(c).count() + b.matches(c).count();
    let dashes = count('-');
    let underscores = count('_');

    let majority = match dashes.cmp(&underscores) {
        std::cmp::Ordering::Greater => Some(NamingConvention::Kebab),
        std::cmp::Ordering::Less => Some(NamingConvention::Snake),
        std::cmp::Ordering::Equal => None,
    };

    PairNaming {
        majority,
        consistent: dashes == 0 || underscores == 0,
    }
}

// ─── CRUD heuristics ────────────────────────────────────────────────────────

/// Words in a path that contradict the semantics of an operation.
pub fn contradicting_words(method: HttpMethod) -> &'static [&'static str] {
    match method {
        HttpMethod::Get => &["create", "add", "new"],
        HttpMethod::Post => &["get", "list", "search"],
        HttpMethod::Put | HttpMethod::Patch => &["delete", "remove"],
        HttpMethod::Delete => &["update", "edit"],
        HttpMethod::Options | HttpMethod::Head | HttpMethod::Trace => &[],
    }
}

/// Case-sensitive substring check of the path against the method's
/// contradicting words.
pub fn crud_violation(path: &str, method: HttpMethod) -> bool {
    contradicting_words(method)
        .iter()
        .any(|word| path.contains(word))
}

// ─── Versioning ─────────────────────────────────────────────────────────────

/// Whether some `/`-separated segment is `v` followed by digits.
pub fn is_versioned(path: &str) -> bool {
    path.split('/')
        .any(|segment| VERSION_SEGMENT_RE.is_match(segment))
}

// ─── Status codes ───────────────────────────────────────────────────────────

/// A response map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKey {
    /// A concrete code such as `201`.
    Code(u16),
    /// A class wildcard such as `4XX`; holds the leading digit.
    Class(u16),
    Default,
}

impl StatusKey {
    pub fn parse(key: &str) -> Option<StatusKey> {
        if key == "default" {
            return Some(StatusKey::Default);
        }
        let caps = STATUS_KEY_RE.captures(key)?;
        if let Some(code) = caps.get(1) {
            return code.as_str().parse().ok().map(StatusKey::Code);
        }
        caps.get(2)
            .and_then(|class| class.as_str().parse().ok())
            .map(StatusKey::Class)
    }

    /// Whether the key names a code inside `range`. A class key counts
    /// when any code of its class falls inside the range.
    pub fn within(self, range: CodeRange) -> bool {
        match self {
            StatusKey::Code(code) => range.contains(code),
            StatusKey::Class(class) => {
                let low = class * 100;
                let high = low + 99;
                low <= range.end && range.start <= high
            }
            StatusKey::Default => false,
        }
    }

    /// Whether the key is a concrete code listed in `codes`.
    pub fn is_one_of(self, codes: &[u16]) -> bool {
        matches!(self, StatusKey::Code(code) if codes.contains(&code))
    }
}
