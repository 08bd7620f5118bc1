//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// lintcache - cached lint results for Go packages
///
/// Fetches a package, lints every Go file, and serves the stored result
/// until it is refreshed.
#[derive(Parser, Debug)]
#[command(name = "lintcache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LINTCACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show lint results for a package, analyzing it if not cached
    Show(ShowArgs),

    /// Re-analyze a package and replace its stored result
    Refresh(RefreshArgs),

    /// Inspect and maintain the result store
    Store(StoreArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Show who runs this fetch bot
    About,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Package path (e.g. github.com/owner/repo/dir)
    pub path: String,

    /// Re-analyze even if a result is stored
    #[arg(short, long)]
    pub refresh: bool,

    /// Hide problems below this confidence (default from config)
    #[arg(short, long)]
    pub min_confidence: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,
}

/// Arguments for the refresh command
#[derive(Parser, Debug)]
pub struct RefreshArgs {
    /// Package path to re-analyze
    pub path: String,
}

/// Output format for the show command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable report
    Text,
    /// JSON record
    Json,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the store command
#[derive(Parser, Debug)]
pub struct StoreArgs {
    /// Subcommand for store
    #[command(subcommand)]
    pub action: StoreAction,
}

/// Store subcommands
#[derive(Subcommand, Debug)]
pub enum StoreAction {
    /// List stored results
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove results written under an older format version
    Prune {
        /// Dry run - show what would be removed
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove the stored result for one package
    Remove {
        /// Package path
        path: String,
    },

    /// Remove every stored result
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
