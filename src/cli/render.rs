//! Text rendering of analysis records

use crate::model::AnalysisRecord;
use chrono::{DateTime, Utc};
use console::style;
use std::fmt::Write;

/// Describe how long ago `then` was, relative to `now`
pub(crate) fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    match secs {
        s if s < 1 => "just now".to_string(),
        s if s < 2 => "one second ago".to_string(),
        s if s < 60 => format!("{} seconds ago", s),
        s if s < 2 * 60 => "one minute ago".to_string(),
        s if s < 60 * 60 => format!("{} minutes ago", s / 60),
        s if s < 2 * 60 * 60 => "one hour ago".to_string(),
        s if s < 48 * 60 * 60 => format!("{} hours ago", s / 3600),
        s => format!("{} days ago", s / 86400),
    }
}

/// Render `record` as a human-readable report
pub(crate) fn render_report(record: &AnalysisRecord, threshold: f64, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", style(record.path()).cyan().bold());
    if !record.browse_url().is_empty() {
        let _ = writeln!(out, "{}", style(record.browse_url()).dim());
    }
    let _ = writeln!(
        out,
        "Updated {}, showing problems with confidence >= {}",
        time_ago(record.updated_at(), now),
        threshold
    );
    let _ = writeln!(out);

    if record.files().is_empty() {
        let _ = writeln!(out, "{} No problems found.", style("✓").green());
        return out;
    }

    for file in record.files() {
        let _ = writeln!(out, "{}", style(&file.name).bold());
        for problem in &file.problems {
            let _ = writeln!(
                out,
                "  {:>5}  {} {}",
                problem.line,
                problem.text,
                style(format!("({:.2})", problem.confidence)).dim()
            );
            if !problem.line_text.is_empty() {
                let _ = writeln!(out, "         {}", style(problem.line_text.trim()).yellow());
            }
            if problem.line > 0 {
                let _ = writeln!(
                    out,
                    "         {}",
                    style(record.line_link(file, problem.line)).dim()
                );
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "{} problem(s) in {} file(s)",
        record.problem_count(),
        record.files().len()
    );
    out
}
