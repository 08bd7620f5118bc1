//! lintcache - on-demand lint analysis with a persistent result cache
//!
//! A package path is fetched from its source host, every Go file is run
//! through the lint engine, and the aggregated record is stored under a
//! versioned envelope. Later lookups are served from the store until a
//! refresh is requested or the storage format version changes.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod orchestrator;
pub mod package;
pub mod setup;
pub mod source;
pub mod store;
pub mod ui;

pub use error::{LintError, LintResult};
pub use orchestrator::CacheOrchestrator;
