//! # deltafiles core
//!
//! Changed-file detection for GitHub Actions workflows.
//!
//! A run resolves the base and head commits of the triggering event,
//! asks the GitHub compare API for the files changed between them, keeps
//! the files matching the configured extensions and renders six groups
//! (`all`, `added`, `modified`, `removed`, `renamed`, `added_modified`) in
//! one of three encodings. `deleted` is emitted as an alias of `removed`.
//!
//! ## Example
//!
//! ```no_run
//! use deltafiles_core::{detect_changes, ConfigInputs, RunConfig};
//!
//! # async fn example() -> deltafiles_core::Result<()> {
//! let config = RunConfig::from_inputs(&ConfigInputs {
//!     token: Some("ghp_example"),
//!     format: Some("json"),
//!     extensions: Some(".rs .toml"),
//!     event_name: Some("push"),
//!     event_path: Some("/home/runner/work/_temp/_github_workflow/event.json"),
//!     repository: Some("octo/widgets"),
//!     ..Default::default()
//! })?;
//!
//! let outputs = detect_changes(&config).await?;
//! println!("Changed files: {}", outputs.all);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod coordination;
pub mod error;
pub mod event;
pub mod git;
pub mod http;
pub mod output;
pub mod patterns;
pub mod traits;
pub mod types;

pub use config::{ConfigInputs, RepositorySlug, RunConfig};
pub use error::{Error, ErrorKind, Result};
pub use event::{Event, EventKind};
pub use output::ComputedOutputs;
pub use types::{ChangeStatus, CommitRange, FileGroups, OutputFormat};

use tracing::info;

use crate::coordination::FileProcessor;
use crate::event::EventResolver;
use crate::git::{ShaResolver, SystemRunner};
use crate::http::GitHubApiClient;
use crate::traits::{CommandRunner, CompareCommits};

/// Detect changed files for the event described by `config`.
///
/// Reads the event payload, runs `git` in `config.repo_path` when the event
/// needs it and calls the GitHub compare API. Any failure stops the run
/// before an output is produced.
pub async fn detect_changes(config: &RunConfig) -> Result<ComputedOutputs> {
    let kind: EventKind = config.event_name.parse()?;

    let payload = event::load_payload(config.event_path.as_deref())?;
    info!(event = %kind, keys = ?event::payload_keys(&payload), "Loaded event payload");

    let current_sha = match (&config.sha, kind) {
        (Some(sha), _) => Some(sha.clone()),
        (None, EventKind::WorkflowDispatch) => {
            Some(ShaResolver::new(&config.repo_path).head_sha()?)
        }
        (None, _) => None,
    };
    let event = Event::from_payload(kind, &payload, current_sha.as_deref())?;

    let runner = SystemRunner::new(&config.repo_path);
    let client = GitHubApiClient::new(config.api_url.as_str(), config.token.as_str());

    detect_changes_with(config, &event, &runner, &client).await
}

/// Detect changed files for an already-parsed event, using the given capabilities
pub async fn detect_changes_with<R, C>(
    config: &RunConfig,
    event: &Event,
    runner: &R,
    comparer: &C,
) -> Result<ComputedOutputs>
where
    R: CommandRunner,
    C: CompareCommits,
{
    let range = EventResolver::new(runner, &config.git).resolve(event).await?;

    let processor = FileProcessor::new(comparer, &config.repository, &config.extensions);
    let groups = processor.process(event.kind(), &range).await?;

    let outputs = ComputedOutputs::compute(&groups, config.format)?;
    for (name, value) in outputs.entries() {
        info!(output = name, %value, "Rendered output");
    }
    info!(
        files = groups.len(),
        added = groups.added.len(),
        modified = groups.modified.len(),
        removed = groups.removed.len(),
        renamed = groups.renamed.len(),
        format = %config.format,
        "Change detection complete"
    );

    Ok(outputs)
}
