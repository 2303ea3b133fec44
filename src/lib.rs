//! Best-practice scoring for OpenAPI 3.x documents.
//!
//! A document is walked once to collect path-tagged facts, seven category
//! subscorers turn those facts into issues and multiplicative point
//! deductions, and the per-category reports are assembled into a total
//! score, a severity histogram and a letter grade:
//!
//! ```text
//! parse(text) → Document → validate(doc) → ValidationResult
//!                        → walk(doc) → ParsedSpecification
//!                        → ScoringEngine::score_all → Vec<ScoringReport>
//!                        → assemble → FinalReport → serialize(report)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! let yaml = r#"
//! openapi: "3.0.3"
//! info:
//!   title: Pet store
//!   version: "1.0"
//! paths:
//!   /pets:
//!     get:
//!       description: List every pet in the store
//!       responses:
//!         "200":
//!           description: A page of pets
//! "#;
//!
//! let result = apiscore::score(yaml).expect("valid document");
//! println!(
//!     "{} / {} ({})",
//!     result.report.total_score, result.report.max_total_score, result.report.overall_grade
//! );
//! ```
//!
//! # Feature Flags
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `parallel` | no      | Runs subscorers on the rayon pool via [`engine::ScoringEngine::score_all_parallel`]. |

pub mod config;
pub mod engine;
pub mod enums;
pub mod error;
pub mod node;
pub mod parse;
pub mod parsed;
pub mod primitives;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod serialize;
pub mod subscorers;
pub mod types;
pub mod validate;
pub mod walk;

pub use config::ScoringConfig;
pub use engine::ScoringEngine;
pub use enums::*;
pub use error::*;
pub use parsed::ParsedSpecification;
pub use report::{FinalReport, Issue, ScoringReport, assemble};
pub use types::Document;

// Re-export entry-point functions at the crate root for convenience.
pub use parse::parse;
pub use serialize::serialize;
pub use validate::validate;
pub use walk::walk;

use tracing::warn;

/// Result of the [`score`] convenience entry point.
#[derive(Clone, Debug)]
pub struct ScoreResult {
    pub report: FinalReport,
    /// Non-fatal warnings produced during validation.
    pub warnings: Vec<Diagnostic>,
}

/// Convenience entry point composing parse → validate → walk → score →
/// assemble with the default configuration.
///
/// # Errors
///
/// Returns `Err(Vec<ApiScoreError>)` if parsing fails or validation finds
/// errors; every validation error is reported.
pub fn score(input: &str) -> Result<ScoreResult, Vec<ApiScoreError>> {
    score_with_config(input, &ScoringConfig::default())
}

/// [`score`] with an explicit configuration.
pub fn score_with_config(
    input: &str,
    config: &ScoringConfig,
) -> Result<ScoreResult, Vec<ApiScoreError>> {
    let doc = parse::parse(input).map_err(|e| {
        warn!(error = %e, "document rejected by parser");
        vec![ApiScoreError::Parse(e)]
    })?;

    let result = validate::validate(&doc);
    if !result.errors.is_empty() {
        warn!(errors = result.errors.len(), "document rejected by validator");
        return Err(result
            .errors
            .into_iter()
            .map(ApiScoreError::Validation)
            .collect());
    }

    Ok(ScoreResult {
        report: score_document(&doc, config),
        warnings: result.warnings,
    })
}

/// Score an already parsed and validated document.
pub fn score_document(doc: &Document, config: &ScoringConfig) -> FinalReport {
    let facts = walk::walk(doc, config);
    let engine = ScoringEngine::from_config(config);
    report::assemble(engine.score_all(&facts))
}
