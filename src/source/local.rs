//! Source fetcher backed by a local directory tree

use super::{SourceDirectory, SourceFetcher, SourceFile};
use crate::error::{LintError, LintResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Serves packages from `<root>/<identifier>`
///
/// Only regular files directly inside the package directory are returned,
/// sorted by name.
pub struct LocalFetcher {
    root: PathBuf,
}

impl LocalFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SourceFetcher for LocalFetcher {
    async fn fetch(&self, identifier: &str) -> LintResult<SourceDirectory> {
        let dir = self.root.join(identifier);
        let missing = || {
            LintError::NotFound(format!(
                "{} does not exist under {}",
                identifier,
                self.root.display()
            ))
        };
        match fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(missing()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(missing()),
            Err(e) => return Err(LintError::io(format!("inspecting {}", dir.display()), e)),
        }

        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| LintError::io(format!("reading package directory {}", dir.display()), e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| LintError::io("reading package entry", e))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| LintError::io(format!("inspecting {}", path.display()), e))?;
            if !file_type.is_file() {
                continue;
            }

            let data = fs::read(&path)
                .await
                .map_err(|e| LintError::io(format!("reading {}", path.display()), e))?;
            files.push(SourceFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                data,
                browse_url: format!("file://{}", path.display()),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Fetched {} files for {} from {}", files.len(), identifier, dir.display());

        Ok(SourceDirectory {
            files,
            line_format: "%s#L%d".to_string(),
            browse_url: format!("file://{}", dir.display()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "local"
    }
}
