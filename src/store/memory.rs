//! In-process key-value store

use super::KvStore;
use crate::error::LintResult;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Key-value store held in memory; contents are lost on drop
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `put` calls served so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn put(&self, key: &str, value: &[u8]) -> LintResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(&self, key: &str) -> LintResult<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> LintResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn delete_if(&self, key: &str, expected: &[u8]) -> LintResult<bool> {
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|v| v.as_slice() == expected) {
            entries.remove(key);
            return Ok(true);
        }
        Ok(false)
    }

    async fn keys(&self) -> LintResult<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}
