//! Source fetcher selection from configuration

use super::{GithubFetcher, LocalFetcher, SourceFetcher};
use crate::config::Config;
use crate::error::{LintError, LintResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Configured source provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Packages under a local directory tree
    Local,
    /// Packages hosted on github.com
    Github,
}

impl Provider {
    /// Parse a provider name from configuration
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "local" => Some(Provider::Local),
            "github" => Some(Provider::Github),
            _ => None,
        }
    }

    /// Get a human-readable provider name
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Local => "local",
            Provider::Github => "github",
        }
    }
}

/// Create the source fetcher named by `config.source.provider`
pub fn create_fetcher(config: &Config) -> LintResult<Arc<dyn SourceFetcher>> {
    let source = &config.source;
    let provider = Provider::parse(&source.provider).ok_or_else(|| {
        LintError::User(format!(
            "Unknown source provider '{}'. Use \"local\" or \"github\".",
            source.provider
        ))
    })?;
    debug!("Using {} source provider", provider.name());

    let fetcher: Arc<dyn SourceFetcher> = match provider {
        Provider::Local => Arc::new(LocalFetcher::new(source.local_root.clone())),
        Provider::Github => Arc::new(GithubFetcher::new(
            source.github_api.clone(),
            Duration::from_secs(source.timeout_secs),
            source.max_file_bytes,
        )),
    };
    Ok(fetcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parse() {
        assert_eq!(Provider::parse("local"), Some(Provider::Local));
        assert_eq!(Provider::parse("GitHub"), Some(Provider::Github));
        assert_eq!(Provider::parse("gitlab"), None);
        assert_eq!(Provider::Github.name(), "github");
    }

    #[test]
    fn create_fetcher_follows_config() {
        let mut config = Config::default();
        config.source.provider = "local".to_string();
        assert_eq!(create_fetcher(&config).unwrap().provider_name(), "local");

        config.source.provider = "github".to_string();
        assert_eq!(create_fetcher(&config).unwrap().provider_name(), "github");

        config.source.provider = "svn".to_string();
        assert!(create_fetcher(&config).is_err());
    }
}
