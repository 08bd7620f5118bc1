//! Package source retrieval
//!
//! A [`SourceFetcher`] turns a package identifier into the files of that
//! package. Fetchers must report unknown packages as
//! [`LintError::NotFound`](crate::error::LintError::NotFound) and upstream
//! failures as [`LintError::Remote`](crate::error::LintError::Remote) so the
//! boundary can answer each differently.

mod factory;
mod github;
mod local;
mod path;

pub use factory::{create_fetcher, Provider};
pub use github::GithubFetcher;
pub use local::LocalFetcher;
pub use path::is_valid_identifier;

use crate::error::LintResult;
use async_trait::async_trait;

/// One file of a fetched package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub data: Vec<u8>,
    pub browse_url: String,
}

/// All files of a fetched package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDirectory {
    pub files: Vec<SourceFile>,
    /// Line link template (`%s` = file URL, `%d` = line number)
    pub line_format: String,
    pub browse_url: String,
}

/// Retrieves package sources
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch every file of the package named by `identifier`
    async fn fetch(&self, identifier: &str) -> LintResult<SourceDirectory>;

    /// Human-readable provider name for display
    fn provider_name(&self) -> &'static str;
}
