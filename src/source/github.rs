//! Source fetcher for GitHub-hosted packages
//!
//! Uses the contents API to list a directory and downloads each file from
//! its raw URL. `ureq` is blocking, so the whole fetch runs on the blocking
//! pool.

use super::{SourceDirectory, SourceFetcher, SourceFile};
use crate::error::{LintError, LintResult};
use crate::setup;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const GITHUB_HOST: &str = "github.com";

/// Fetches `github.com/<owner>/<repo>[/<dir>]` packages
pub struct GithubFetcher {
    client: GithubClient,
}

#[derive(Debug, Clone)]
struct GithubClient {
    api_base: String,
    timeout: Duration,
    max_file_bytes: u64,
}

/// A package identifier split into its GitHub parts
#[derive(Debug, Clone, PartialEq, Eq)]
struct GithubPath {
    owner: String,
    repo: String,
    dir: String,
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: u64,
    download_url: Option<String>,
    html_url: Option<String>,
}

impl GithubFetcher {
    pub fn new(api_base: impl Into<String>, timeout: Duration, max_file_bytes: u64) -> Self {
        Self {
            client: GithubClient {
                api_base: api_base.into().trim_end_matches('/').to_string(),
                timeout,
                max_file_bytes,
            },
        }
    }
}

#[async_trait]
impl SourceFetcher for GithubFetcher {
    async fn fetch(&self, identifier: &str) -> LintResult<SourceDirectory> {
        let path = GithubPath::parse(identifier)?;
        let client = self.client.clone();
        let user_agent = setup::user_agent();

        tokio::task::spawn_blocking(move || client.fetch_blocking(&path, &user_agent))
            .await
            .map_err(|e| LintError::Internal(format!("Fetch task failed: {}", e)))?
    }

    fn provider_name(&self) -> &'static str {
        "github"
    }
}

impl GithubPath {
    fn parse(identifier: &str) -> LintResult<Self> {
        let mut parts = identifier.splitn(4, '/');
        let host = parts.next().unwrap_or_default();
        if host != GITHUB_HOST {
            return Err(LintError::NotFound(format!(
                "{} is not hosted on {}",
                identifier, GITHUB_HOST
            )));
        }

        match (parts.next(), parts.next()) {
            (Some(owner), Some(repo)) => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
                dir: parts.next().unwrap_or_default().to_string(),
            }),
            _ => Err(LintError::NotFound(format!(
                "{} does not name a repository",
                identifier
            ))),
        }
    }

    fn contents_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            api_base, self.owner, self.repo, self.dir
        )
    }

    fn browse_url(&self) -> String {
        let base = format!("https://{}/{}/{}", GITHUB_HOST, self.owner, self.repo);
        if self.dir.is_empty() {
            base
        } else {
            format!("{}/tree/HEAD/{}", base, self.dir)
        }
    }
}

impl GithubClient {
    fn fetch_blocking(&self, path: &GithubPath, user_agent: &str) -> LintResult<SourceDirectory> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();

        let listing_url = path.contents_url(&self.api_base);
        let listing = get(&agent, &listing_url, user_agent, "application/vnd.github+json")?;
        let entries: Vec<ContentEntry> = serde_json::from_slice(&listing).map_err(|_| {
            LintError::NotFound(format!("{}/{} {} is not a directory", path.owner, path.repo, path.dir))
        })?;

        let mut files = Vec::new();
        for entry in entries.into_iter().filter(|e| e.kind == "file") {
            if entry.size > self.max_file_bytes {
                debug!("Skipping {} ({} bytes)", entry.name, entry.size);
                continue;
            }
            let Some(download_url) = entry.download_url else {
                continue;
            };

            let data = get(&agent, &download_url, user_agent, "*/*")?;
            files.push(SourceFile {
                browse_url: entry.html_url.unwrap_or_else(|| download_url.clone()),
                name: entry.name,
                data,
            });
        }

        debug!(
            "Fetched {} files from {}/{}",
            files.len(),
            path.owner,
            path.repo
        );

        Ok(SourceDirectory {
            files,
            line_format: "%s#L%d".to_string(),
            browse_url: path.browse_url(),
        })
    }
}

fn get(agent: &ureq::Agent, url: &str, user_agent: &str, accept: &str) -> LintResult<Vec<u8>> {
    let host = host_of(url);
    let mut response = agent
        .get(url)
        .header("User-Agent", user_agent)
        .header("Accept", accept)
        .call()
        .map_err(|e| map_fetch_error(&host, url, e))?;

    response
        .body_mut()
        .read_to_vec()
        .map_err(|e| map_fetch_error(&host, url, e))
}

fn map_fetch_error(host: &str, url: &str, err: ureq::Error) -> LintError {
    match err {
        ureq::Error::StatusCode(404) => LintError::NotFound(format!("{} returned 404", url)),
        ureq::Error::StatusCode(code) => LintError::remote(host, format!("HTTP status {}", code)),
        other => LintError::remote(host, other.to_string()),
    }
}

fn host_of(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', ':'])
        .next()
        .unwrap_or_default()
        .to_string()
}
