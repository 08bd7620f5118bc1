//! Filesystem-backed key-value store
//!
//! One file per key, named by the SHA256 of the key. Each file holds the
//! key on its first line followed by the raw value bytes. Writes go to a
//! uniquely named temporary file that is renamed into place, so readers see
//! either the old value or the new one.

use super::KvStore;
use crate::error::{LintError, LintResult};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

const ENTRY_EXTENSION: &str = "entry";

/// Key-value store rooted at an existing directory
#[derive(Debug, Clone)]
pub struct FsKvStore {
    root: PathBuf,
}

impl FsKvStore {
    /// Open the store at `root`, which must already be a directory
    pub async fn open(root: impl Into<PathBuf>) -> LintResult<Self> {
        let root = root.into();
        let meta = fs::metadata(&root)
            .await
            .map_err(|e| LintError::io(format!("opening store directory {}", root.display()), e))?;
        if !meta.is_dir() {
            return Err(LintError::io(
                format!("opening store directory {}", root.display()),
                std::io::Error::new(ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        Ok(Self { root })
    }

    /// Directory holding the entries
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        self.stem_path(&digest)
    }

    fn stem_path(&self, stem: &str) -> PathBuf {
        self.root.join(format!("{}.{}", stem, ENTRY_EXTENSION))
    }

    fn temp_path(&self) -> PathBuf {
        self.root.join(format!(".tmp-{}", Uuid::new_v4()))
    }

    /// Path of the file addressed by `key`.
    ///
    /// Files whose header cannot be read are listed under their file stem,
    /// so a key that names such a file resolves to it directly.
    async fn locate(&self, key: &str) -> PathBuf {
        let path = self.entry_path(key);
        if is_digest(key) && !fs::try_exists(&path).await.unwrap_or(false) {
            let orphan = self.stem_path(key);
            if fs::try_exists(&orphan).await.unwrap_or(false) {
                return orphan;
            }
        }
        path
    }
}

/// Split an entry file into its key and value
fn split_entry(contents: &[u8]) -> Option<(&str, &[u8])> {
    let newline = contents.iter().position(|&b| b == b'\n')?;
    let key = std::str::from_utf8(&contents[..newline]).ok()?;
    Some((key, &contents[newline + 1..]))
}

/// Whether `s` looks like the SHA256 hex stem of an entry file
fn is_digest(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[async_trait]
impl KvStore for FsKvStore {
    async fn put(&self, key: &str, value: &[u8]) -> LintResult<()> {
        if key.contains('\n') {
            return Err(LintError::Internal(format!(
                "store key contains a newline: {:?}",
                key
            )));
        }

        let mut contents = Vec::with_capacity(key.len() + 1 + value.len());
        contents.extend_from_slice(key.as_bytes());
        contents.push(b'\n');
        contents.extend_from_slice(value);

        let tmp = self.temp_path();
        fs::write(&tmp, &contents)
            .await
            .map_err(|e| LintError::io(format!("writing {}", tmp.display()), e))?;

        let path = self.entry_path(key);
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(LintError::io(format!("replacing {}", path.display()), e));
        }

        debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> LintResult<Option<Vec<u8>>> {
        let path = self.locate(key).await;
        let contents = match fs::read(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LintError::io(format!("reading {}", path.display()), e)),
        };

        match split_entry(&contents) {
            Some((stored_key, value)) if stored_key == key => Ok(Some(value.to_vec())),
            // A file without a valid header has no recoverable value
            _ => Ok(Some(Vec::new())),
        }
    }

    async fn delete(&self, key: &str) -> LintResult<()> {
        let path = self.locate(key).await;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LintError::io(format!("removing {}", path.display()), e)),
        }
    }

    /// Move the entry aside, compare, and put it back unless a newer value
    /// has landed in the meantime.
    async fn delete_if(&self, key: &str, expected: &[u8]) -> LintResult<bool> {
        let path = self.entry_path(key);
        let taken = self.temp_path();
        match fs::rename(&path, &taken).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(LintError::io(format!("moving {}", path.display()), e)),
        }

        let contents = fs::read(&taken).await;
        let matches = matches!(
            contents.as_deref().ok().and_then(split_entry),
            Some((stored_key, value)) if stored_key == key && value == expected
        );

        if !matches {
            // hard_link fails if a writer has replaced the entry since
            match fs::hard_link(&taken, &path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Entry {} rewritten during conditional delete", key);
                }
                Err(e) => {
                    return Err(LintError::io(format!("restoring {}", path.display()), e));
                }
            }
        }

        fs::remove_file(&taken)
            .await
            .map_err(|e| LintError::io(format!("removing {}", taken.display()), e))?;
        Ok(matches)
    }

    async fn keys(&self) -> LintResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| LintError::io("reading store directory", e))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| LintError::io("reading store entry", e))?
        {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            let contents = match fs::read(&path).await {
                Ok(c) => c,
                // removed between listing and reading
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(LintError::io(format!("reading {}", path.display()), e)),
            };
            match split_entry(&contents) {
                Some((key, _)) if self.entry_path(key) == path => keys.push(key.to_string()),
                _ => keys.push(stem),
            }
        }

        keys.sort();
        Ok(keys)
    }
}
