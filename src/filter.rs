//! Request-scoped confidence filtering
//!
//! Filtering builds a new record for display. The stored record is never
//! touched and the filtered one is never persisted.

use crate::model::{AnalysisRecord, FileReport};

/// Threshold used when a request supplies none
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.8;

/// Parse a caller-supplied threshold.
///
/// Absent, unparseable and non-finite values fall back to `default`.
pub fn parse_min_confidence(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|t| t.is_finite())
        .unwrap_or(default)
}

/// Drop problems with confidence below `threshold`.
///
/// Relative order is preserved. Files left without problems are dropped.
pub fn apply_confidence_filter(record: &AnalysisRecord, threshold: f64) -> AnalysisRecord {
    let files = record
        .files()
        .iter()
        .map(|file| FileReport {
            name: file.name.clone(),
            browse_url: file.browse_url.clone(),
            problems: file
                .problems
                .iter()
                .filter(|p| p.confidence >= threshold)
                .cloned()
                .collect(),
        })
        .collect();

    record.with_files(files)
}
