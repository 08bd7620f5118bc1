//! Show command - print lint results for a package

use super::present_failure;
use crate::cli::args::{ReportFormat, ShowArgs};
use crate::cli::render::render_report;
use crate::config::Config;
use crate::error::LintResult;
use crate::filter::{apply_confidence_filter, parse_min_confidence};
use crate::orchestrator::CacheOrchestrator;
use crate::ui::{TaskSpinner, UiContext};
use chrono::Utc;

/// Execute the show command
pub async fn execute(args: ShowArgs, config: &Config) -> LintResult<()> {
    let ctx = UiContext::detect();
    let orchestrator = CacheOrchestrator::from_config(config).await?;
    let threshold = parse_min_confidence(
        args.min_confidence.as_deref(),
        config.filter.min_confidence,
    );

    let mut spinner = TaskSpinner::new(&ctx);
    if ctx.use_fancy_output() {
        spinner.start(&format!("Looking up {}", args.path));
    }
    let resolved = orchestrator.resolve(&args.path, args.refresh).await;
    spinner.clear();

    let record = resolved.map_err(|e| present_failure(&args.path, e))?;
    let filtered = apply_confidence_filter(&record, threshold);

    match args.format {
        ReportFormat::Text => print!("{}", render_report(&filtered, threshold, Utc::now())),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&filtered)?),
    }

    Ok(())
}
