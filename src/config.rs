//! Scoring configuration.
//!
//! Every knob has a default, so an empty configuration document is valid:
//!
//! ```yaml
//! budgets:
//!   schema: 20
//!   security: 10
//! description_min_length: 15
//! major_methods: [get, post, put, delete]
//! versioned_paths_threshold: 0.8
//! referenced_tags_threshold: 0.7
//! success_codes: { start: 200, end: 299 }
//! error_codes: { start: 400, end: 599 }
//! no_content_codes: [204, 400, 404]
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::enums::HttpMethod;
use crate::error::ConfigError;

/// Point budget of each category. The sum is the maximum possible total.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Budgets {
    #[serde(default = "default_schema_budget")]
    pub schema: f64,
    #[serde(default = "default_description_budget")]
    pub description: f64,
    #[serde(default = "default_paths_budget")]
    pub paths: f64,
    #[serde(default = "default_response_codes_budget")]
    pub response_codes: f64,
    #[serde(default = "default_examples_budget")]
    pub examples: f64,
    #[serde(default = "default_security_budget")]
    pub security: f64,
    #[serde(default = "default_misc_budget")]
    pub misc: f64,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            schema: default_schema_budget(),
            description: default_description_budget(),
            paths: default_paths_budget(),
            response_codes: default_response_codes_budget(),
            examples: default_examples_budget(),
            security: default_security_budget(),
            misc: default_misc_budget(),
        }
    }
}

impl Budgets {
    pub fn total(&self) -> f64 {
        self.schema
            + self.description
            + self.paths
            + self.response_codes
            + self.examples
            + self.security
            + self.misc
    }

    fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("schema", self.schema),
            ("description", self.description),
            ("paths", self.paths),
            ("response_codes", self.response_codes),
            ("examples", self.examples),
            ("security", self.security),
            ("misc", self.misc),
        ]
    }
}

fn default_schema_budget() -> f64 {
    20.0
}
fn default_description_budget() -> f64 {
    20.0
}
fn default_paths_budget() -> f64 {
    15.0
}
fn default_response_codes_budget() -> f64 {
    15.0
}
fn default_examples_budget() -> f64 {
    10.0
}
fn default_security_budget() -> f64 {
    10.0
}
fn default_misc_budget() -> f64 {
    10.0
}

/// Inclusive range of numeric status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CodeRange {
    pub start: u16,
    pub end: u16,
}

impl CodeRange {
    pub fn contains(&self, code: u16) -> bool {
        self.start <= code && code <= self.end
    }
}

/// Thresholds and budgets used by the walker and the subscorers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub budgets: Budgets,

    /// Descriptions shorter than this many characters are flagged.
    #[serde(default = "default_description_min_length")]
    pub description_min_length: usize,

    /// Operations whose request bodies and responses must carry examples.
    #[serde(default = "default_major_methods")]
    pub major_methods: Vec<HttpMethod>,

    /// Minimum share of defined paths that carry a `vN` segment.
    #[serde(default = "default_versioned_paths_threshold")]
    pub versioned_paths_threshold: f64,

    /// Minimum share of operation tag references declared at the root.
    #[serde(default = "default_referenced_tags_threshold")]
    pub referenced_tags_threshold: f64,

    #[serde(default = "default_success_codes")]
    pub success_codes: CodeRange,

    #[serde(default = "default_error_codes")]
    pub error_codes: CodeRange,

    /// Status codes allowed to declare no response content.
    #[serde(default = "default_no_content_codes")]
    pub no_content_codes: Vec<u16>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            budgets: Budgets::default(),
            description_min_length: default_description_min_length(),
            major_methods: default_major_methods(),
            versioned_paths_threshold: default_versioned_paths_threshold(),
            referenced_tags_threshold: default_referenced_tags_threshold(),
            success_codes: default_success_codes(),
            error_codes: default_error_codes(),
            no_content_codes: default_no_content_codes(),
        }
    }
}

fn default_description_min_length() -> usize {
    15
}
fn default_major_methods() -> Vec<HttpMethod> {
    vec![
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
    ]
}
fn default_versioned_paths_threshold() -> f64 {
    0.8
}
fn default_referenced_tags_threshold() -> f64 {
    0.7
}
fn default_success_codes() -> CodeRange {
    CodeRange {
        start: 200,
        end: 299,
    }
}
fn default_error_codes() -> CodeRange {
    CodeRange {
        start: 400,
        end: 599,
    }
}
fn default_no_content_codes() -> Vec<u16> {
    vec![204, 400, 404]
}

impl ScoringConfig {
    /// Load a configuration from YAML (or JSON) text and check its ranges.
    pub fn from_yaml(input: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig = if input.trim().is_empty() {
            ScoringConfig::default()
        } else {
            serde_saphyr::from_str(input).map_err(|e| ConfigError {
                message: e.to_string(),
            })?
        };
        config.check()?;
        debug!(
            max_total = config.budgets.total(),
            "loaded scoring config"
        );
        Ok(config)
    }

    /// Reject budgets below zero and thresholds outside `[0, 1]`.
    pub fn check(&self) -> Result<(), ConfigError> {
        for (name, budget) in self.budgets.named() {
            if !budget.is_finite() || budget < 0.0 {
                return Err(ConfigError {
                    message: format!("budget '{}' must be a non-negative number, got {}", name, budget),
                });
            }
        }
        for (name, threshold) in [
            ("versioned_paths_threshold", self.versioned_paths_threshold),
            ("referenced_tags_threshold", self.referenced_tags_threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError {
                    message: format!("'{}' must be within [0, 1], got {}", name, threshold),
                });
            }
        }
        for (name, range) in [
            ("success_codes", self.success_codes),
            ("error_codes", self.error_codes),
        ] {
            if range.start > range.end {
                return Err(ConfigError {
                    message: format!(
                        "'{}' range is empty: {} > {}",
                        name, range.start, range.end
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn is_major_method(&self, method: HttpMethod) -> bool {
        self.major_methods.contains(&method)
    }
}
