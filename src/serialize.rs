//! [`FinalReport`] → JSON / YAML serialization.

use crate::enums::ReportFormat;
use crate::error::SerializeError;
use crate::report::FinalReport;

/// Serialize a report in the requested format.
///
/// Keys appear in report order: `total_score`, `max_total_score`,
/// `overall_grade`, `severity_counts`, then `reports` in registration order.
pub fn serialize(report: &FinalReport, format: ReportFormat) -> Result<String, SerializeError> {
    match format {
        ReportFormat::Json => to_json(report),
        ReportFormat::Yaml => to_yaml(report),
    }
}

/// Pretty-printed JSON.
pub fn to_json(report: &FinalReport) -> Result<String, SerializeError> {
    serde_json::to_string_pretty(report).map_err(|e| SerializeError {
        message: format!("failed to serialize report to JSON: {}", e),
    })
}

pub fn to_yaml(report: &FinalReport) -> Result<String, SerializeError> {
    // Convert to serde_json::Value first for consistent field ordering
    let value = serde_json::to_value(report).map_err(|e| SerializeError {
        message: format!("failed to convert report to JSON value: {}", e),
    })?;

    serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize report to YAML: {}", e),
    })
}
