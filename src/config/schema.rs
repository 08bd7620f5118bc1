//! Configuration schema for lintcache
//!
//! Configuration is stored at `~/.config/lintcache/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Service identity
    pub service: ServiceConfig,

    /// Package source settings
    pub source: SourceConfig,

    /// Result store settings
    pub store: StoreConfig,

    /// Confidence filter defaults
    pub filter: FilterConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Identity announced to upstream hosts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address operators can be reached at
    pub contact_email: String,

    /// Page describing the fetch bot, sent in the user agent
    pub bot_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            contact_email: "unknown@example.com".to_string(),
            bot_url: "http://localhost/-/bot".to_string(),
        }
    }
}

/// Package source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Source provider: "local" or "github"
    pub provider: String,

    /// Root directory for the local provider
    pub local_root: PathBuf,

    /// GitHub API base URL
    pub github_api: String,

    /// Suffix of files that get analyzed
    pub suffix: String,

    /// Timeout for a single upstream request
    pub timeout_secs: u64,

    /// Files larger than this are skipped by remote providers
    pub max_file_bytes: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            provider: "github".to_string(),
            local_root: PathBuf::from("."),
            github_api: "https://api.github.com".to_string(),
            suffix: ".go".to_string(),
            timeout_secs: 30,
            max_file_bytes: 1024 * 1024,
        }
    }
}

/// Result store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store directory (defaults to the state directory)
    pub path: Option<PathBuf>,

    /// Delete entries written under an older format version when read
    pub prune_stale_on_read: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            prune_stale_on_read: true,
        }
    }
}

/// Confidence filter defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Threshold used when a request does not supply a usable one
    pub min_confidence: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_confidence: crate::filter::DEFAULT_MIN_CONFIDENCE,
        }
    }
}
