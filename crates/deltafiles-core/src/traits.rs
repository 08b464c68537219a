//! Capability traits for the subprocess runner and the compare API

use std::future::Future;

use crate::config::RepositorySlug;
use crate::error::Result;
use crate::types::{CommitRange, CompareResponse};

/// Runs an executable and captures its standard output
pub trait CommandRunner {
    /// Run `program` with `args`, returning stdout as text.
    ///
    /// Fails when the executable cannot be located or exits non-zero.
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [&'a str],
    ) -> impl Future<Output = Result<String>> + Send + 'a;
}

/// Compares two commits of a hosted repository
pub trait CompareCommits {
    /// Fetch the relationship and changed files between `range.base` and `range.head`.
    ///
    /// A non-success HTTP status is reported in the response, not as an error.
    fn compare<'a>(
        &'a self,
        repository: &'a RepositorySlug,
        range: &'a CommitRange,
    ) -> impl Future<Output = Result<CompareResponse>> + Send + 'a;
}
