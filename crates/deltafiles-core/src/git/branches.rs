//! Local branch listing and parent-branch selection

use crate::error::{Error, Result};
use crate::traits::CommandRunner;

/// Branch names accepted as the base of a manually dispatched run
pub const PARENT_BRANCHES: [&str; 3] = ["develop", "main", "master"];

/// Arguments listing local branches, one short name per line
pub const LIST_BRANCHES_ARGS: [&str; 3] = ["branch", "--list", "--format=%(refname:short)"];

/// Parse `git branch` output into branch names, in listing order.
///
/// Accepts both `--format=%(refname:short)` output and the default
/// decorated form (`* main`, `+ wt-branch`). Detached-HEAD lines are skipped.
pub fn parse_branch_listing(listing: &str) -> Vec<&str> {
    listing
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("* ")
                .or_else(|| line.strip_prefix("+ "))
                .unwrap_or(line)
                .trim()
        })
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .collect()
}

/// First branch in listing order whose whole name is a parent branch.
///
/// Order of appearance wins, not the order of [`PARENT_BRANCHES`].
pub fn find_parent_branch<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .find(|name| PARENT_BRANCHES.contains(name))
}

/// List local branches and pick the parent branch
pub async fn detect_parent_branch<R: CommandRunner>(runner: &R, git: &str) -> Result<String> {
    let listing = runner.run(git, &LIST_BRANCHES_ARGS).await?;
    let names = parse_branch_listing(&listing);
    tracing::debug!(branches = ?names, "Listed local branches");

    find_parent_branch(names.iter().copied())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::Config(format!(
                "No parent branch found: none of the local branches [{}] is named {}",
                names.join(", "),
                PARENT_BRANCHES.join(", ")
            ))
        })
}
