//! Package analysis: fetch, lint every source file, persist

use crate::analysis::{aggregate_file, Analyzer};
use crate::error::{LintError, LintResult};
use crate::model::AnalysisRecord;
use crate::source::{SourceDirectory, SourceFetcher};
use crate::store::ResultStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Suffix of files analyzed when none is configured
pub const DEFAULT_SOURCE_SUFFIX: &str = ".go";

/// Builds and persists a fresh [`AnalysisRecord`] for one package
#[derive(Clone)]
pub struct PackageAnalyzer {
    fetcher: Arc<dyn SourceFetcher>,
    engine: Arc<dyn Analyzer>,
    store: ResultStore,
    suffix: String,
}

impl PackageAnalyzer {
    pub fn new(
        fetcher: Arc<dyn SourceFetcher>,
        engine: Arc<dyn Analyzer>,
        store: ResultStore,
    ) -> Self {
        Self {
            fetcher,
            engine,
            store,
            suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
        }
    }

    /// Analyze files ending in `suffix` instead of the default
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// The store records are persisted to
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Fetch, analyze and persist `identifier`.
    ///
    /// Fetch failures propagate before anything is written. The record is
    /// only returned once it has been stored.
    pub async fn run(&self, identifier: &str) -> LintResult<AnalysisRecord> {
        let dir = self.fetcher.fetch(identifier).await?;
        debug!(
            "Fetched {} files for {} via {}, linting with {}",
            dir.files.len(),
            identifier,
            self.fetcher.provider_name(),
            self.engine.name()
        );

        let record = self.build_record(identifier, dir).await?;
        self.store.put(identifier, &record).await?;

        info!(
            "Analyzed {}: {} problems in {} files",
            identifier,
            record.problem_count(),
            record.files().len()
        );
        Ok(record)
    }

    async fn build_record(&self, identifier: &str, dir: SourceDirectory) -> LintResult<AnalysisRecord> {
        let updated_at = Utc::now();
        let engine = Arc::clone(&self.engine);
        let suffix = self.suffix.clone();
        let SourceDirectory {
            files,
            line_format,
            browse_url,
        } = dir;

        let reports = tokio::task::spawn_blocking(move || {
            files
                .iter()
                .filter(|f| f.name.ends_with(&suffix))
                .filter_map(|f| aggregate_file(engine.as_ref(), &f.name, &f.browse_url, &f.data))
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| LintError::Internal(format!("Analysis task failed: {}", e)))?;

        Ok(AnalysisRecord::with_timestamp(
            identifier,
            updated_at,
            line_format,
            browse_url,
            reports,
        ))
    }
}
