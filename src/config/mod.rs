//! Configuration loading for lintcache
//!
//! The manager owns two locations: the TOML file the settings come from and
//! the directory the result store lives in. A loaded [`Config`] has already
//! been checked, so callers can rely on a known provider and a usable
//! confidence default.

pub mod schema;

pub use schema::Config;

use crate::error::{LintError, LintResult};
use crate::source::Provider;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const APP_DIR: &str = "lintcache";

/// Locates, reads and writes the lintcache configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for the per-user config file
    pub fn for_user() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_path(base.join(APP_DIR).join("config.toml"))
    }

    /// Manager for an explicit config file
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Config file this manager reads and writes
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Read and check the config file. A missing file yields the defaults.
    pub async fn load(&self) -> LintResult<Config> {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.config_path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(LintError::io(
                    format!("reading config from {}", self.config_path.display()),
                    e,
                ))
            }
        };

        let config: Config = toml::from_str(&content).map_err(|e| self.invalid(e.to_string()))?;
        check(&config).map_err(|reason| self.invalid(reason))?;
        Ok(config)
    }

    fn invalid(&self, reason: String) -> LintError {
        LintError::ConfigInvalid {
            path: self.config_path.clone(),
            reason,
        }
    }

    /// Write `config` to the config file, creating its directory
    pub async fn save(&self, config: &Config) -> LintResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| LintError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            LintError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Directory the result store lives in: `store.path`, or `store` under
    /// the per-user state directory
    pub fn store_dir(config: &Config) -> PathBuf {
        if let Some(path) = &config.store.path {
            return path.clone();
        }
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("store")
    }

    /// Resolve the store directory and create it if needed
    pub async fn ensure_store_dir(config: &Config) -> LintResult<PathBuf> {
        let dir = Self::store_dir(config);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| LintError::io(format!("creating store directory {}", dir.display()), e))?;
        Ok(dir)
    }
}

/// Reject settings that parse but cannot be used
fn check(config: &Config) -> Result<(), String> {
    if Provider::parse(&config.source.provider).is_none() {
        return Err(format!(
            "source.provider must be \"local\" or \"github\", got \"{}\"",
            config.source.provider
        ));
    }

    let min = config.filter.min_confidence;
    if !min.is_finite() || !(0.0..=1.0).contains(&min) {
        return Err(format!(
            "filter.min_confidence must be between 0 and 1, got {}",
            min
        ));
    }

    match config.general.log_format.as_str() {
        "text" | "json" => Ok(()),
        other => Err(format!(
            "general.log_format must be \"text\" or \"json\", got \"{}\"",
            other
        )),
    }
}
