//! Persistent result storage
//!
//! Two layers:
//!
//! - [`KvStore`]: raw bytes keyed by string, atomic per key, last writer
//!   wins. Knows nothing about what it stores.
//! - [`ResultStore`]: wraps analysis records in a versioned
//!   [`StoredEnvelope`] on top of a `KvStore`.
//!
//! # Entry States
//!
//! | State | `get` returns | Description |
//! |-------|---------------|-------------|
//! | Missing | `None` | Never written, or removed |
//! | Stale | `None` | Written under another format version |
//! | Current | `Some(record)` | Version matches, payload decodes |
//! | Corrupt | `Err(Corruption)` | Version matches, payload does not decode |

mod envelope;
mod fs;
mod memory;
mod result;

pub use envelope::{StoredEnvelope, FORMAT_VERSION};
pub use fs::FsKvStore;
pub use memory::MemoryKvStore;
pub use result::{EntryInfo, EntryStatus, ResultStore};

use crate::error::LintResult;
use async_trait::async_trait;

/// Byte-oriented key-value store with single-key atomic operations
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Write `value` under `key`, replacing any existing value
    async fn put(&self, key: &str, value: &[u8]) -> LintResult<()>;

    /// Read the value under `key`
    async fn get(&self, key: &str) -> LintResult<Option<Vec<u8>>>;

    /// Remove `key`; removing a missing key is not an error
    async fn delete(&self, key: &str) -> LintResult<()>;

    /// Remove `key` only while it still holds `expected`.
    ///
    /// Returns whether the entry was removed. A value written after
    /// `expected` was read is never removed.
    async fn delete_if(&self, key: &str, expected: &[u8]) -> LintResult<bool>;

    /// All stored keys, sorted
    async fn keys(&self) -> LintResult<Vec<String>>;
}
