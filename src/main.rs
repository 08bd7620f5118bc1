//! lintcache - cached lint results for Go packages
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use lintcache::cli::{Cli, Commands};
use lintcache::config::{Config, ConfigManager};
use lintcache::error::LintResult;
use lintcache::ui;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> LintResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::for_user(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    if std::io::stdout().is_terminal() {
        ui::init_theme();
    }

    match cli.command {
        Commands::Show(args) => lintcache::cli::commands::show(args, &config).await,
        Commands::Refresh(args) => lintcache::cli::commands::refresh(args, &config).await,
        Commands::Store(args) => lintcache::cli::commands::store(args, &config).await,
        Commands::Config(args) => {
            lintcache::cli::commands::config(args, &config, &config_manager).await
        }
        Commands::About => lintcache::cli::commands::about(&config).await,
    }
}

/// 0 = warn, 1 = info, 2+ = debug. `RUST_LOG` overrides the level.
fn init_logging(verbose: u8, config: &Config) {
    let default_level = match verbose {
        0 => "lintcache=warn",
        1 => "lintcache=info",
        _ => "lintcache=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.with_target(false).without_time().init();
    }
}
