//! Comparison, filtering and classification of changed files

use tracing::{debug, info};

use crate::config::RepositorySlug;
use crate::error::{Error, Result};
use crate::event::EventKind;
use crate::patterns::ExtensionFilter;
use crate::traits::CompareCommits;
use crate::types::{ChangeStatus, CommitRange, ComparedFile, ComparisonStatus, FileGroups};

/// Runs the compare call and classifies its files
pub struct FileProcessor<'a, C: CompareCommits> {
    comparer: &'a C,
    repository: &'a RepositorySlug,
    extensions: &'a ExtensionFilter,
}

impl<'a, C: CompareCommits> FileProcessor<'a, C> {
    /// Create a new file processor
    pub fn new(
        comparer: &'a C,
        repository: &'a RepositorySlug,
        extensions: &'a ExtensionFilter,
    ) -> Self {
        Self {
            comparer,
            repository,
            extensions,
        }
    }

    /// Compare `range` and classify the changed files.
    ///
    /// `event` only names the trigger in error messages.
    pub async fn process(&self, event: EventKind, range: &CommitRange) -> Result<FileGroups> {
        // Step 1: compare, requiring HTTP 200
        let response = self.comparer.compare(self.repository, range).await?;
        if response.http_status != 200 {
            return Err(Error::Upstream(format!(
                "The GitHub API for comparing the base and head commits for this {} event \
                 returned {}, expected 200",
                event, response.http_status
            )));
        }
        let comparison = response.body.ok_or_else(|| {
            Error::Upstream(format!("Compare response for {} had no body", range))
        })?;

        // Step 2: head must be strictly ahead of base
        if comparison.status != ComparisonStatus::Ahead {
            return Err(Error::Upstream(format!(
                "The head commit for this {} event is not ahead of the base commit \
                 (comparison status: {})",
                event,
                comparison.status.as_str()
            )));
        }
        debug!(files = comparison.files.len(), "Comparison returned");

        // Steps 3-4: filter and classify
        let groups = classify(&comparison.files, self.extensions)?;
        info!(
            total = comparison.files.len(),
            accepted = groups.len(),
            "Classified changed files"
        );
        Ok(groups)
    }
}

/// Keep files passing `filter` and sort them into status groups, in order.
///
/// An unknown status on a kept file is an error; on a dropped file it is ignored.
pub fn classify(files: &[ComparedFile], filter: &ExtensionFilter) -> Result<FileGroups> {
    let mut groups = FileGroups::default();
    for file in files.iter().filter(|f| filter.accepts(&f.filename)) {
        let status = ChangeStatus::parse(&file.status).ok_or_else(|| {
            Error::DataShape(format!(
                "One of your files includes an unsupported file status '{}', expected \
                 'added', 'modified', 'removed', or 'renamed'.",
                file.status
            ))
        })?;
        groups.push(&file.filename, status);
    }
    Ok(groups)
}
