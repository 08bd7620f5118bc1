//! Versioned analysis record store

use super::{KvStore, StoredEnvelope};
use crate::error::{LintError, LintResult};
use crate::model::AnalysisRecord;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// State of a stored entry as seen by maintenance commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Written under the current format version
    Current,
    /// Written under another format version
    Stale,
    /// Envelope cannot be parsed
    Unreadable,
}

/// One stored entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub key: String,
    pub status: EntryStatus,
    /// Format version, when the envelope parses
    pub format_version: Option<u32>,
}

/// Persists analysis records inside versioned envelopes
#[derive(Clone)]
pub struct ResultStore {
    kv: Arc<dyn KvStore>,
    prune_stale_on_read: bool,
}

impl ResultStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            prune_stale_on_read: true,
        }
    }

    /// Set whether `get` deletes entries written under another version
    pub fn with_prune_stale_on_read(mut self, prune: bool) -> Self {
        self.prune_stale_on_read = prune;
        self
    }

    /// Serialize `record` and write it under `key`, replacing any entry
    pub async fn put(&self, key: &str, record: &AnalysisRecord) -> LintResult<()> {
        let persist_err = |reason: String| LintError::Persist {
            key: key.to_string(),
            reason,
        };

        let payload = serde_json::to_vec(record).map_err(|e| persist_err(e.to_string()))?;
        let bytes = StoredEnvelope::current(payload)
            .encode()
            .map_err(|e| persist_err(e.to_string()))?;

        self.kv
            .put(key, &bytes)
            .await
            .map_err(|e| persist_err(e.to_string()))
    }

    /// Read the record under `key`.
    ///
    /// Missing and stale entries both read as `None`. A current entry that
    /// does not decode is corruption.
    pub async fn get(&self, key: &str) -> LintResult<Option<AnalysisRecord>> {
        let Some(bytes) = self.kv.get(key).await? else {
            debug!("Store miss for {}", key);
            return Ok(None);
        };

        let envelope = StoredEnvelope::decode(&bytes).map_err(|e| LintError::Corruption {
            key: key.to_string(),
            reason: format!("unreadable envelope: {}", e),
        })?;

        if !envelope.is_current() {
            debug!(
                "Stale entry for {} (format version {})",
                key, envelope.format_version
            );
            if self.prune_stale_on_read {
                match self.kv.delete_if(key, &bytes).await {
                    Ok(true) => debug!("Deleted stale entry for {}", key),
                    Ok(false) => debug!("Stale entry for {} was replaced, keeping it", key),
                    Err(e) => warn!("Failed to delete stale entry {}: {}", key, e),
                }
            }
            return Ok(None);
        }

        let record = serde_json::from_slice(&envelope.payload).map_err(|e| {
            LintError::Corruption {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!("Store hit for {}", key);
        Ok(Some(record))
    }

    /// Remove the entry under `key`
    pub async fn remove(&self, key: &str) -> LintResult<()> {
        self.kv.delete(key).await
    }

    /// List every stored entry with its envelope status
    pub async fn entries(&self) -> LintResult<Vec<EntryInfo>> {
        let mut infos = Vec::new();
        for key in self.kv.keys().await? {
            let Some(bytes) = self.kv.get(&key).await? else {
                continue;
            };
            let info = match StoredEnvelope::decode(&bytes) {
                Ok(env) => EntryInfo {
                    status: if env.is_current() {
                        EntryStatus::Current
                    } else {
                        EntryStatus::Stale
                    },
                    format_version: Some(env.format_version),
                    key,
                },
                Err(_) => EntryInfo {
                    key,
                    status: EntryStatus::Unreadable,
                    format_version: None,
                },
            };
            infos.push(info);
        }
        Ok(infos)
    }

    /// Delete every stale entry, returning the removed keys.
    ///
    /// With `dry_run` nothing is deleted.
    pub async fn prune(&self, dry_run: bool) -> LintResult<Vec<String>> {
        let stale: Vec<String> = self
            .entries()
            .await?
            .into_iter()
            .filter(|e| e.status == EntryStatus::Stale)
            .map(|e| e.key)
            .collect();

        if !dry_run {
            for key in &stale {
                self.kv.delete(key).await?;
            }
            info!("Pruned {} stale entries", stale.len());
        }
        Ok(stale)
    }

    /// Delete every entry, returning how many were removed
    pub async fn clear(&self) -> LintResult<usize> {
        let keys = self.kv.keys().await?;
        for key in &keys {
            self.kv.delete(key).await?;
        }
        Ok(keys.len())
    }
}
