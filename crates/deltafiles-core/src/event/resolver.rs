//! Base/head resolution per event kind

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::event::Event;
use crate::git::branches::detect_parent_branch;
use crate::traits::CommandRunner;
use crate::types::CommitRange;

/// Resolves the commit pair to compare for a triggering event
pub struct EventResolver<'a, R: CommandRunner> {
    runner: &'a R,
    git: &'a str,
}

impl<'a, R: CommandRunner> EventResolver<'a, R> {
    /// Create a resolver that runs `git` through `runner`
    pub fn new(runner: &'a R, git: &'a str) -> Self {
        Self { runner, git }
    }

    /// Produce `(base, head)` for `event`.
    ///
    /// Push and pull request events read the payload only; a manual dispatch
    /// compares the current commit against the first parent branch found locally.
    pub async fn resolve(&self, event: &Event) -> Result<CommitRange> {
        let range = match event {
            Event::Push { before, after } => CommitRange::new(before, after),
            Event::PullRequest { base_sha, head_sha } => CommitRange::new(base_sha, head_sha),
            Event::WorkflowDispatch { sha } => {
                let base = detect_parent_branch(self.runner, self.git).await?;
                let range = CommitRange::new(base, sha);
                self.log_local_diff(&range).await;
                range
            }
        };

        info!(
            event = %event.kind(),
            base = %range.base,
            head = %range.head,
            "Resolved commit range"
        );
        Ok(range)
    }

    /// Log the local name-status and name-only diff. Never fails the run.
    async fn log_local_diff(&self, range: &CommitRange) {
        for mode in ["--name-status", "--name-only"] {
            let args = ["diff", mode, range.base.as_str(), range.head.as_str()];
            match self.runner.run(self.git, &args).await {
                Ok(listing) => debug!(mode, listing = %listing.trim_end(), "Local diff"),
                Err(e) => warn!(mode, error = %e, "Local diff unavailable"),
            }
        }
    }
}
