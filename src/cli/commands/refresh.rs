//! Refresh command - re-analyze a package

use super::present_failure;
use crate::cli::args::RefreshArgs;
use crate::config::Config;
use crate::error::LintResult;
use crate::orchestrator::CacheOrchestrator;
use crate::ui::{TaskSpinner, UiContext};

/// Execute the refresh command
pub async fn execute(args: RefreshArgs, config: &Config) -> LintResult<()> {
    let ctx = UiContext::detect();
    let orchestrator = CacheOrchestrator::from_config(config).await?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Analyzing {}", args.path));

    match orchestrator.resolve(&args.path, true).await {
        Ok(record) => {
            spinner.stop(&format!(
                "Analyzed {}: {} problem(s) in {} file(s)",
                record.path(),
                record.problem_count(),
                record.files().len()
            ));
            Ok(())
        }
        Err(e) => {
            let presented = present_failure(&args.path, e);
            spinner.stop_error(&format!("Failed to analyze {}", args.path));
            Err(presented)
        }
    }
}
