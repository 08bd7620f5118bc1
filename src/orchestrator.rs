//! Cache orchestration: serve a stored record or recompute it
//!
//! No lock is taken per identifier. Concurrent misses for the same package
//! may each run the analyzer; the store keeps whichever write lands last.

use crate::analysis::GoLinter;
use crate::config::schema::ServiceConfig;
use crate::config::{Config, ConfigManager};
use crate::error::{LintError, LintResult};
use crate::model::AnalysisRecord;
use crate::package::PackageAnalyzer;
use crate::setup;
use crate::source::{create_fetcher, is_valid_identifier};
use crate::store::{FsKvStore, ResultStore};
use std::sync::Arc;
use tracing::debug;

/// Open the on-disk result store configured by `config`
pub async fn open_store(config: &Config) -> LintResult<ResultStore> {
    let dir = ConfigManager::ensure_store_dir(config).await?;
    let kv = FsKvStore::open(dir).await?;
    Ok(ResultStore::new(Arc::new(kv))
        .with_prune_stale_on_read(config.store.prune_stale_on_read))
}

/// Predicate deciding which identifiers may be looked up
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Entry point for package lookups
#[derive(Clone)]
pub struct CacheOrchestrator {
    analyzer: PackageAnalyzer,
    service: ServiceConfig,
    validator: Validator,
}

impl CacheOrchestrator {
    pub fn new(analyzer: PackageAnalyzer, service: ServiceConfig) -> Self {
        Self {
            analyzer,
            service,
            validator: Arc::new(is_valid_identifier),
        }
    }

    /// Replace the identifier check applied before any fetch or store access
    pub fn with_validator(
        mut self,
        validator: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Wire up the configured fetcher, the Go linter and the on-disk store
    pub async fn from_config(config: &Config) -> LintResult<Self> {
        let engine = GoLinter::new()
            .map_err(|e| LintError::Internal(format!("compiling lint rules: {}", e)))?;
        let analyzer = PackageAnalyzer::new(
            create_fetcher(config)?,
            Arc::new(engine),
            open_store(config).await?,
        )
        .with_suffix(config.source.suffix.clone());
        Ok(Self::new(analyzer, config.service.clone()))
    }

    /// Look up `identifier`, analyzing it on a miss or when `refresh` is set.
    ///
    /// A refresh never reads the store. Analyzer failures propagate
    /// unchanged.
    pub async fn resolve(&self, identifier: &str, refresh: bool) -> LintResult<AnalysisRecord> {
        setup::ensure(&self.service);

        if !(self.validator)(identifier) {
            return Err(LintError::BadRequest(identifier.to_string()));
        }

        if !refresh {
            if let Some(record) = self.analyzer.store().get(identifier).await? {
                debug!("Serving cached result for {}", identifier);
                return Ok(record);
            }
        }

        debug!(
            "{} {}, running analysis",
            identifier,
            if refresh { "refresh requested" } else { "not cached" }
        );
        self.analyzer.run(identifier).await
    }
}
