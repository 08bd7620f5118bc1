//! Cache orchestration against in-memory collaborators

use async_trait::async_trait;
use lintcache::analysis::{AnalysisFailure, Analyzer, Finding};
use lintcache::config::schema::ServiceConfig;
use lintcache::filter::{apply_confidence_filter, DEFAULT_MIN_CONFIDENCE};
use lintcache::package::PackageAnalyzer;
use lintcache::setup;
use lintcache::source::{SourceDirectory, SourceFetcher, SourceFile};
use lintcache::store::{KvStore, MemoryKvStore, ResultStore, StoredEnvelope, FORMAT_VERSION};
use lintcache::error::ErrorKind;
use lintcache::{CacheOrchestrator, LintError, LintResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Serves a fixed directory for every identifier except `bogus/pkg`
struct FixtureFetcher {
    files: Vec<(&'static str, &'static str)>,
    calls: AtomicUsize,
}

impl FixtureFetcher {
    fn new(files: Vec<(&'static str, &'static str)>) -> Arc<Self> {
        Arc::new(Self {
            files,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceFetcher for FixtureFetcher {
    async fn fetch(&self, identifier: &str) -> LintResult<SourceDirectory> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if identifier == "bogus/pkg" {
            return Err(LintError::NotFound(identifier.to_string()));
        }
        Ok(SourceDirectory {
            files: self
                .files
                .iter()
                .map(|(name, body)| SourceFile {
                    name: name.to_string(),
                    data: body.as_bytes().to_vec(),
                    browse_url: format!("https://{}/{}", identifier, name),
                })
                .collect(),
            line_format: "%s#L%d".to_string(),
            browse_url: format!("https://{}", identifier),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fixture"
    }
}

/// Reads `confidence` values one per line; `FAIL` makes the file unparseable
struct ScriptedEngine;

impl Analyzer for ScriptedEngine {
    fn analyze(&self, file_name: &str, data: &[u8]) -> Result<Vec<Finding>, AnalysisFailure> {
        let text = String::from_utf8_lossy(data);
        if text.trim() == "FAIL" {
            return Err(AnalysisFailure::new(format!(
                "{}:1:1: expected 'package', found 'FAIL'",
                file_name
            )));
        }
        Ok(text
            .lines()
            .enumerate()
            .filter_map(|(i, l)| {
                l.parse::<f64>().ok().map(|confidence| Finding {
                    line: i as u32 + 1,
                    text: format!("finding at {}", confidence),
                    line_text: l.to_string(),
                    confidence,
                })
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Reads through to a memory store but refuses every write
struct ReadOnlyKv(MemoryKvStore);

#[async_trait]
impl KvStore for ReadOnlyKv {
    async fn put(&self, key: &str, _value: &[u8]) -> LintResult<()> {
        Err(LintError::io(
            format!("writing {}", key),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        ))
    }

    async fn get(&self, key: &str) -> LintResult<Option<Vec<u8>>> {
        self.0.get(key).await
    }

    async fn delete(&self, key: &str) -> LintResult<()> {
        self.0.delete(key).await
    }

    async fn delete_if(&self, key: &str, expected: &[u8]) -> LintResult<bool> {
        self.0.delete_if(key, expected).await
    }

    async fn keys(&self) -> LintResult<Vec<String>> {
        self.0.keys().await
    }
}

struct Harness {
    fetcher: Arc<FixtureFetcher>,
    kv: Arc<MemoryKvStore>,
    orchestrator: CacheOrchestrator,
}

fn harness(files: Vec<(&'static str, &'static str)>) -> Harness {
    let fetcher = FixtureFetcher::new(files);
    let kv = Arc::new(MemoryKvStore::new());
    let analyzer = PackageAnalyzer::new(
        fetcher.clone(),
        Arc::new(ScriptedEngine),
        ResultStore::new(kv.clone()),
    );
    Harness {
        fetcher,
        kv,
        orchestrator: CacheOrchestrator::new(analyzer, ServiceConfig::default()),
    }
}

fn example_package() -> Vec<(&'static str, &'static str)> {
    vec![("a.go", "0.9\nok\n0.5\n"), ("b.go", "clean\n")]
}

#[tokio::test]
async fn example_package_filters_by_threshold() {
    let h = harness(example_package());
    let record = h.orchestrator.resolve("example.com/a", false).await.unwrap();

    let filtered = apply_confidence_filter(&record, DEFAULT_MIN_CONFIDENCE);
    assert_eq!(filtered.files().len(), 1);
    assert_eq!(filtered.files()[0].name, "a.go");
    assert_eq!(filtered.files()[0].problems.len(), 1);
    assert_eq!(filtered.files()[0].problems[0].confidence, 0.9);

    let filtered = apply_confidence_filter(&record, 0.3);
    assert_eq!(filtered.files().len(), 1);
    assert_eq!(filtered.files()[0].problems.len(), 2);
}

#[tokio::test]
async fn second_resolve_is_served_from_store() {
    let h = harness(example_package());
    let first = h.orchestrator.resolve("example.com/a", false).await.unwrap();
    let second = h.orchestrator.resolve("example.com/a", false).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.updated_at(), second.updated_at());
    assert_eq!(h.fetcher.calls(), 1);
    assert_eq!(h.kv.write_count(), 1);
}

#[tokio::test]
async fn refresh_recomputes_and_overwrites() {
    let h = harness(example_package());
    let first = h.orchestrator.resolve("example.com/a", false).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let refreshed = h.orchestrator.resolve("example.com/a", true).await.unwrap();

    assert!(refreshed.updated_at() > first.updated_at());
    assert_eq!(h.fetcher.calls(), 2);

    let cached = h.orchestrator.resolve("example.com/a", false).await.unwrap();
    assert_eq!(cached.updated_at(), refreshed.updated_at());
}

#[tokio::test]
async fn missing_package_writes_nothing() {
    let h = harness(example_package());
    let err = h.orchestrator.resolve("bogus/pkg", false).await.unwrap_err();

    assert!(matches!(err, LintError::NotFound(_)));
    assert_eq!(err.public_message(), "Not Found");
    assert_eq!(h.kv.write_count(), 0);
}

#[tokio::test]
async fn invalid_identifier_is_rejected_before_fetch() {
    let h = harness(example_package());
    for bad in ["", "../etc/passwd", "example.com/.hidden", "a//b", "a b"] {
        let err = h.orchestrator.resolve(bad, false).await.unwrap_err();
        assert!(matches!(err, LintError::BadRequest(_)), "{:?}", bad);
    }
    assert_eq!(h.fetcher.calls(), 0);
}

#[tokio::test]
async fn unparseable_file_becomes_line_zero_problem() {
    let h = harness(vec![("bad.go", "FAIL\n"), ("good.go", "clean\n")]);
    let record = h.orchestrator.resolve("example.com/bad", false).await.unwrap();

    assert_eq!(record.files().len(), 1);
    let file = &record.files()[0];
    assert_eq!(file.name, "bad.go");
    assert_eq!(file.problems.len(), 1);
    assert_eq!(file.problems[0].line, 0);
    assert_eq!(
        file.problems[0].text,
        "bad.go:1:1: expected 'package', found 'FAIL'"
    );
}

#[tokio::test]
async fn stale_format_version_is_a_miss() {
    let h = harness(example_package());
    let stale = StoredEnvelope {
        payload: b"{\"shape\":\"from an older release\"}".to_vec(),
        format_version: FORMAT_VERSION + 1,
    };
    h.kv.put("example.com/a", &stale.encode().unwrap())
        .await
        .unwrap();

    let record = h.orchestrator.resolve("example.com/a", false).await.unwrap();
    assert_eq!(record.path(), "example.com/a");
    assert_eq!(h.fetcher.calls(), 1);

    let bytes = h.kv.get("example.com/a").await.unwrap().unwrap();
    assert!(StoredEnvelope::decode(&bytes).unwrap().is_current());
}

#[tokio::test]
async fn corrupt_current_entry_is_an_error() {
    let h = harness(example_package());
    let broken = StoredEnvelope::current(b"not a record".to_vec());
    h.kv.put("example.com/a", &broken.encode().unwrap())
        .await
        .unwrap();

    let err = h.orchestrator.resolve("example.com/a", false).await.unwrap_err();
    assert!(matches!(err, LintError::Corruption { .. }));
    assert_eq!(err.public_message(), "Internal Server Error");
    assert_eq!(h.fetcher.calls(), 0);

    // A refresh skips the read and repairs the entry
    h.orchestrator.resolve("example.com/a", true).await.unwrap();
    h.orchestrator.resolve("example.com/a", false).await.unwrap();
}

#[tokio::test]
async fn concurrent_misses_all_succeed() {
    let h = harness(example_package());
    let orchestrator = Arc::new(h.orchestrator);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.resolve("example.com/a", false).await })
        })
        .collect();

    for task in tasks {
        let record = task.await.unwrap().unwrap();
        assert_eq!(record.problem_count(), 2);
    }
    assert!(h.fetcher.calls() >= 1);
    assert_eq!(h.kv.len().await, 1);
}

#[tokio::test]
async fn resolve_runs_one_time_setup() {
    let h = harness(example_package());
    h.orchestrator.resolve("example.com/a", false).await.unwrap();
    assert!(setup::identity().is_some());
}

#[tokio::test]
async fn refresh_replaces_stale_entry() {
    let h = harness(example_package());
    let stale = StoredEnvelope {
        payload: b"{}".to_vec(),
        format_version: FORMAT_VERSION + 1,
    };
    h.kv.put("example.com/a", &stale.encode().unwrap())
        .await
        .unwrap();

    let record = h.orchestrator.resolve("example.com/a", true).await.unwrap();
    assert_eq!(record.problem_count(), 2);
    assert_eq!(h.fetcher.calls(), 1);

    let bytes = h.kv.get("example.com/a").await.unwrap().unwrap();
    let envelope = StoredEnvelope::decode(&bytes).unwrap();
    assert!(envelope.is_current());

    let cached = h.orchestrator.resolve("example.com/a", false).await.unwrap();
    assert_eq!(cached, record);
    assert_eq!(h.fetcher.calls(), 1);
}

#[tokio::test]
async fn persist_failure_surfaces_as_internal_error() {
    let fetcher = FixtureFetcher::new(example_package());
    let analyzer = PackageAnalyzer::new(
        fetcher.clone(),
        Arc::new(ScriptedEngine),
        ResultStore::new(Arc::new(ReadOnlyKv(MemoryKvStore::new()))),
    );
    let orchestrator = CacheOrchestrator::new(analyzer, ServiceConfig::default());

    let err = orchestrator.resolve("example.com/a", false).await.unwrap_err();
    assert!(matches!(err, LintError::Persist { .. }), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.public_message(), "Internal Server Error");
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn custom_validator_replaces_identifier_check() {
    let h = harness(example_package());
    let orchestrator = h
        .orchestrator
        .with_validator(|id: &str| id.starts_with("internal/"));

    let err = orchestrator.resolve("example.com/a", false).await.unwrap_err();
    assert!(matches!(err, LintError::BadRequest(_)));
    assert_eq!(h.fetcher.calls(), 0);

    // Accepted even though the default check rejects the double slash
    let record = orchestrator.resolve("internal//a", false).await.unwrap();
    assert_eq!(record.path(), "internal//a");
    assert_eq!(h.fetcher.calls(), 1);
}
