//! Commit resolution through libgit2

use crate::error::{Error, Result};
use std::path::Path;

/// SHA resolver for Git references
pub struct ShaResolver {
    repo_path: std::path::PathBuf,
}

impl ShaResolver {
    /// Create a new SHA resolver for a repository (or any directory inside one)
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Resolve the commit currently checked out
    pub fn head_sha(&self) -> Result<String> {
        self.resolve_ref("HEAD")
    }

    /// Resolve a reference (hash, branch, tag, `HEAD~n`) to a full SHA
    pub fn resolve_ref(&self, reference: &str) -> Result<String> {
        let repo = git2::Repository::discover(&self.repo_path)?;

        let resolved = repo
            .revparse_single(reference)
            .map_err(|e| {
                Error::Git(format!(
                    "Failed to resolve reference '{}': {}",
                    reference,
                    e.message()
                ))
            })?
            .peel_to_commit()?;

        Ok(resolved.id().to_string())
    }
}
