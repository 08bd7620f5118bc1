//! Static analysis engine interface and per-file aggregation
//!
//! The engine is a black box: file name and bytes in, findings out.
//! [`aggregate_file`] turns one engine run into an optional [`FileReport`].
//!
//! [`FileReport`]: crate::model::FileReport

mod aggregate;
mod golint;

pub use aggregate::aggregate_file;
pub use golint::GoLinter;

use thiserror::Error;

/// One raw diagnostic emitted by an engine
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub line: u32,
    pub text: String,
    pub line_text: String,
    pub confidence: f64,
}

/// The engine could not analyze a file (e.g. it failed to parse)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AnalysisFailure {
    pub message: String,
}

impl AnalysisFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A static analysis engine
///
/// Implementations run on the blocking thread pool and must be cheap to
/// share across tasks.
pub trait Analyzer: Send + Sync {
    /// Analyze one file
    fn analyze(&self, file_name: &str, data: &[u8]) -> Result<Vec<Finding>, AnalysisFailure>;

    /// Short engine name for logs
    fn name(&self) -> &'static str;
}
