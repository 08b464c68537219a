//! GitHub REST API client for commit comparison

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;

use crate::config::RepositorySlug;
use crate::error::{Error, Result};
use crate::traits::CompareCommits;
use crate::types::{CommitRange, CompareResponse, Comparison};

const USER_AGENT: &str = concat!("deltafiles/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// GitHub API client for the compare endpoint
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// `{base}/repos/{owner}/{repo}/compare/{base}...{head}`, each segment percent-encoded
    pub fn compare_url(&self, repository: &RepositorySlug, range: &CommitRange) -> Result<Url> {
        let compare = format!("{}...{}", range.base, range.head);
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend([
                "repos",
                repository.owner.as_str(),
                repository.repo.as_str(),
                "compare",
                compare.as_str(),
            ]);
        Ok(url)
    }
}

impl CompareCommits for GitHubApiClient {
    fn compare<'a>(
        &'a self,
        repository: &'a RepositorySlug,
        range: &'a CommitRange,
    ) -> impl Future<Output = Result<CompareResponse>> + Send + 'a {
        async move {
            let url = self.compare_url(repository, range)?;
            tracing::debug!(%url, "Requesting comparison");

            let response = self
                .client
                .get(url)
                .header(ACCEPT, "application/vnd.github+json")
                .header(AUTHORIZATION, format!("Bearer {}", self.token))
                .header("X-GitHub-Api-Version", API_VERSION)
                .send()
                .await?;

            let http_status = response.status().as_u16();
            if !response.status().is_success() {
                return Ok(CompareResponse {
                    http_status,
                    body: None,
                });
            }

            let comparison: Comparison = response.json().await?;
            Ok(CompareResponse {
                http_status,
                body: Some(comparison),
            })
        }
    }
}
