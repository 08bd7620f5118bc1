//! Per-file finding aggregation

use super::Analyzer;
use crate::model::{FileReport, Problem};
use tracing::debug;

/// Run `engine` over one file and normalize its output.
///
/// Returns `None` when the file is clean. An engine failure becomes a
/// single problem at line 0 carrying the failure message.
pub fn aggregate_file(
    engine: &dyn Analyzer,
    name: &str,
    browse_url: &str,
    data: &[u8],
) -> Option<FileReport> {
    let problems = match engine.analyze(name, data) {
        Ok(findings) if findings.is_empty() => {
            debug!("{} is clean", name);
            return None;
        }
        Ok(findings) => findings
            .into_iter()
            .map(|f| Problem {
                line: f.line,
                text: f.text,
                line_text: f.line_text,
                confidence: f.confidence,
            })
            .collect(),
        Err(failure) => {
            debug!("{} failed analysis: {}", name, failure);
            vec![Problem {
                line: 0,
                text: failure.message,
                line_text: String::new(),
                confidence: 0.0,
            }]
        }
    };

    Some(FileReport {
        name: name.to_string(),
        browse_url: browse_url.to_string(),
        problems,
    })
}
