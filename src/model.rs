//! Analysis result records
//!
//! An [`AnalysisRecord`] is built once per analysis run and never mutated.
//! A refresh produces a new record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finding in a source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// 1-based line number, 0 when the finding covers the whole file
    pub line: u32,

    /// Human-readable message
    pub text: String,

    /// Literal text of the offending line (empty if not applicable)
    pub line_text: String,

    /// Certainty that the finding is a true positive, in [0.0, 1.0]
    pub confidence: f64,
}

/// Findings for one source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// File name as reported by the source fetcher
    pub name: String,

    /// Display link for the file
    pub browse_url: String,

    /// Problems in engine emission order
    pub problems: Vec<Problem>,
}

/// Aggregated analysis result for one package
///
/// Decoding goes through the constructor, so a stored record can never
/// hold a file report without problems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawRecord")]
pub struct AnalysisRecord {
    path: String,
    updated_at: DateTime<Utc>,
    line_format: String,
    browse_url: String,
    files: Vec<FileReport>,
}

/// Wire shape of [`AnalysisRecord`] before its invariants are applied
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    path: String,
    updated_at: DateTime<Utc>,
    line_format: String,
    browse_url: String,
    files: Vec<FileReport>,
}

impl From<RawRecord> for AnalysisRecord {
    fn from(raw: RawRecord) -> Self {
        Self::with_timestamp(
            raw.path,
            raw.updated_at,
            raw.line_format,
            raw.browse_url,
            raw.files,
        )
    }
}

impl AnalysisRecord {
    /// Create a record stamped with the current time.
    ///
    /// File reports without problems are dropped.
    pub fn new(
        path: impl Into<String>,
        line_format: impl Into<String>,
        browse_url: impl Into<String>,
        files: Vec<FileReport>,
    ) -> Self {
        Self::with_timestamp(path, Utc::now(), line_format, browse_url, files)
    }

    /// Create a record with an explicit timestamp
    pub fn with_timestamp(
        path: impl Into<String>,
        updated_at: DateTime<Utc>,
        line_format: impl Into<String>,
        browse_url: impl Into<String>,
        files: Vec<FileReport>,
    ) -> Self {
        Self {
            path: path.into(),
            updated_at,
            line_format: line_format.into(),
            browse_url: browse_url.into(),
            files: files.into_iter().filter(|f| !f.problems.is_empty()).collect(),
        }
    }

    /// Package identifier, also the store key
    pub fn path(&self) -> &str {
        &self.path
    }

    /// When the analysis ran
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Line link template from the source fetcher (`%s` = file URL, `%d` = line)
    pub fn line_format(&self) -> &str {
        &self.line_format
    }

    /// Display link for the package
    pub fn browse_url(&self) -> &str {
        &self.browse_url
    }

    /// Files with at least one problem, in fetch order
    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// Total number of problems across all files
    pub fn problem_count(&self) -> usize {
        self.files.iter().map(|f| f.problems.len()).sum()
    }

    /// Build a copy that keeps identity and timestamp but replaces the files
    pub(crate) fn with_files(&self, files: Vec<FileReport>) -> Self {
        Self::with_timestamp(
            self.path.clone(),
            self.updated_at,
            self.line_format.clone(),
            self.browse_url.clone(),
            files,
        )
    }

    /// Expand the line format into a link for `file` at `line`.
    ///
    /// `%s` and `%d` are substituted in a single pass over the format, so
    /// placeholders inside the substituted URL are left alone. `%%` is a
    /// literal percent sign.
    pub fn line_link(&self, file: &FileReport, line: u32) -> String {
        if self.line_format.is_empty() {
            return file.browse_url.clone();
        }

        let mut link = String::with_capacity(self.line_format.len() + file.browse_url.len());
        let mut chars = self.line_format.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                link.push(c);
                continue;
            }
            match chars.next() {
                Some('s') => link.push_str(&file.browse_url),
                Some('d') => link.push_str(&line.to_string()),
                Some('%') => link.push('%'),
                Some(other) => {
                    link.push('%');
                    link.push(other);
                }
                None => link.push('%'),
            }
        }
        link
    }
}
