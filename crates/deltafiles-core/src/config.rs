//! Run configuration, built once per invocation and passed by reference

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::patterns::ExtensionFilter;
use crate::types::OutputFormat;

/// Default GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// `owner/repo` pair identifying a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl FromStr for RepositorySlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(Error::Config(format!(
                "Invalid GITHUB_REPOSITORY format: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Raw inputs as handed over by the workflow runner.
///
/// Empty strings count as unset, since Actions passes `""` for omitted inputs.
#[derive(Debug, Clone, Default)]
pub struct ConfigInputs<'a> {
    /// `token` input
    pub token: Option<&'a str>,
    /// `format` input
    pub format: Option<&'a str>,
    /// `extensions` input
    pub extensions: Option<&'a str>,
    /// `GITHUB_EVENT_NAME`
    pub event_name: Option<&'a str>,
    /// `GITHUB_EVENT_PATH`
    pub event_path: Option<&'a str>,
    /// `GITHUB_SHA`
    pub sha: Option<&'a str>,
    /// `GITHUB_REPOSITORY`
    pub repository: Option<&'a str>,
    /// `GITHUB_API_URL`
    pub api_url: Option<&'a str>,
    /// Repository checkout used for git subprocesses
    pub repo_path: Option<&'a str>,
    /// Name or path of the git executable
    pub git: Option<&'a str>,
}

/// Validated, request-scoped configuration
#[derive(Clone)]
pub struct RunConfig {
    /// Credential for the compare API
    pub token: String,
    /// Output encoding
    pub format: OutputFormat,
    /// Extension inclusion filter
    pub extensions: ExtensionFilter,
    /// Triggering event name, validated later by the resolver
    pub event_name: String,
    /// Location of the event payload, if the runner provided one
    pub event_path: Option<PathBuf>,
    /// Current commit, head for manually dispatched runs
    pub sha: Option<String>,
    /// Repository the compare call targets
    pub repository: RepositorySlug,
    /// REST API base URL
    pub api_url: String,
    /// Working directory for git subprocesses
    pub repo_path: PathBuf,
    /// git executable name or path
    pub git: String,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("token", &"<redacted>")
            .field("format", &self.format)
            .field("extensions", &self.extensions)
            .field("event_name", &self.event_name)
            .field("event_path", &self.event_path)
            .field("sha", &self.sha)
            .field("repository", &self.repository)
            .field("api_url", &self.api_url)
            .field("repo_path", &self.repo_path)
            .field("git", &self.git)
            .finish()
    }
}

fn present(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

impl RunConfig {
    /// Validate raw inputs into a configuration.
    ///
    /// Rejects a missing token, event name or repository and an unknown format.
    pub fn from_inputs(inputs: &ConfigInputs<'_>) -> Result<Self> {
        let token = present(inputs.token)
            .ok_or_else(|| Error::Config("Input 'token' is required".to_string()))?;

        let format = match present(inputs.format) {
            Some(f) => f.parse()?,
            None => OutputFormat::default(),
        };

        let extensions = ExtensionFilter::parse(inputs.extensions.unwrap_or(""));

        let event_name = present(inputs.event_name)
            .ok_or_else(|| Error::Config("GITHUB_EVENT_NAME not set".to_string()))?;

        let repository = present(inputs.repository)
            .ok_or_else(|| Error::Config("GITHUB_REPOSITORY not set".to_string()))?
            .parse()?;

        let api_url = present(inputs.api_url)
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            token: token.to_string(),
            format,
            extensions,
            event_name: event_name.to_string(),
            event_path: present(inputs.event_path).map(PathBuf::from),
            sha: present(inputs.sha).map(str::to_string),
            repository,
            api_url,
            repo_path: PathBuf::from(present(inputs.repo_path).unwrap_or(".")),
            git: present(inputs.git).unwrap_or("git").to_string(),
        })
    }
}
