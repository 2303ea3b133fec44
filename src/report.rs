//! Issues, per-category reports and the assembled final report.
//!
//! A [`ScoringReport`] is never mutated in place: each [`Penalty`] consumes
//! the report and returns the next one, so the difference between charging
//! per issue and charging once per rule is visible in the penalty value.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::info;

use crate::enums::{Grade, Severity};

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn serialize_round1<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round1(*value))
}

// ─── Issue ──────────────────────────────────────────────────────────────────

/// A single finding.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Issue {
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Issue {
            message: message.into(),
            severity,
            path: None,
            suggestion: None,
        }
    }

    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

// ─── Penalty ────────────────────────────────────────────────────────────────

/// One step of the fold that produces a [`ScoringReport`].
#[derive(Clone, Debug, PartialEq)]
pub enum Penalty {
    /// Record the issue and multiply points by its own severity.
    Instance(Issue),
    /// Record every issue and multiply points once by `severity`.
    /// A batch with no issues changes nothing.
    Batch { severity: Severity, issues: Vec<Issue> },
}

// ─── ScoringReport ──────────────────────────────────────────────────────────

/// Outcome of one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoringReport {
    #[serde(rename = "subscorer")]
    pub category: String,
    #[serde(rename = "score", serialize_with = "serialize_round1")]
    pub points: f64,
    #[serde(rename = "max_score", serialize_with = "serialize_round1")]
    pub max_points: f64,
    pub issues: Vec<Issue>,
}

impl ScoringReport {
    /// A report with full points and no issues.
    pub fn new(category: impl Into<String>, max_points: f64) -> Self {
        ScoringReport {
            category: category.into(),
            points: max_points,
            max_points,
            issues: Vec::new(),
        }
    }

    /// Fold a sequence of penalties over a fresh report.
    pub fn fold(
        category: impl Into<String>,
        max_points: f64,
        penalties: impl IntoIterator<Item = Penalty>,
    ) -> Self {
        penalties
            .into_iter()
            .fold(ScoringReport::new(category, max_points), ScoringReport::apply)
    }

    pub fn apply(self, penalty: Penalty) -> Self {
        match penalty {
            Penalty::Instance(issue) => self.with_issue(issue),
            Penalty::Batch { severity, issues } => self.with_batch(severity, issues),
        }
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.points = charge(self.points, issue.severity);
        self.issues.push(issue);
        self
    }

    pub fn with_batch(mut self, severity: Severity, issues: Vec<Issue>) -> Self {
        if issues.is_empty() {
            return self;
        }
        self.points = charge(self.points, severity);
        self.issues.extend(issues);
        self
    }
}

fn charge(points: f64, severity: Severity) -> f64 {
    (points * severity.multiplier()).max(0.0)
}

// ─── FinalReport ────────────────────────────────────────────────────────────

/// The assembled result of a scoring run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinalReport {
    pub total_score: f64,
    pub max_total_score: f64,
    pub overall_grade: Grade,
    /// Issue count per severity; every severity is present.
    pub severity_counts: BTreeMap<Severity, usize>,
    pub reports: Vec<ScoringReport>,
}

impl FinalReport {
    pub fn issue_count(&self) -> usize {
        self.severity_counts.values().sum()
    }

    /// The report of the named category, if one was produced.
    pub fn category(&self, name: &str) -> Option<&ScoringReport> {
        self.reports.iter().find(|r| r.category == name)
    }
}

/// Aggregate per-category reports into a [`FinalReport`].
pub fn assemble(reports: Vec<ScoringReport>) -> FinalReport {
    let total_score = round1(reports.iter().map(|r| r.points).sum());
    let max_total_score = round1(reports.iter().map(|r| r.max_points).sum());
    let overall_grade = Grade::from_score(total_score);

    let mut severity_counts: BTreeMap<Severity, usize> =
        Severity::ALL.into_iter().map(|s| (s, 0)).collect();
    for issue in reports.iter().flat_map(|r| &r.issues) {
        *severity_counts.entry(issue.severity).or_default() += 1;
    }

    info!(
        total_score,
        max_total_score,
        grade = %overall_grade,
        "assembled report"
    );

    FinalReport {
        total_score,
        max_total_score,
        overall_grade,
        severity_counts,
        reports,
    }
}
