//! Core type definitions

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Change status of a file, as reported by the compare API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChangeStatus {
    /// Added file
    Added = b'A',
    /// Modified file
    Modified = b'M',
    /// Removed file
    Removed = b'D',
    /// Renamed file
    Renamed = b'R',
}

impl ChangeStatus {
    /// Parse the API status string. Anything beyond the four known kinds is `None`.
    #[inline]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "added" => Some(Self::Added),
            "modified" => Some(Self::Modified),
            "removed" => Some(Self::Removed),
            "renamed" => Some(Self::Renamed),
            _ => None,
        }
    }

    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
        }
    }

    /// Whether files of this status belong to `added_modified`
    #[inline]
    pub const fn is_added_or_modified(&self) -> bool {
        matches!(self, Self::Added | Self::Modified | Self::Renamed)
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pair of commit references a diff is computed between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Older commit (hash or symbolic name)
    pub base: String,
    /// Newer commit (hash or symbolic name)
    pub head: String,
}

impl CommitRange {
    /// Create a new range
    pub fn new(base: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            head: head.into(),
        }
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...{}", self.base, self.head)
    }
}

/// Relationship of head to base reported by the compare API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    /// Head is strictly ahead of base
    Ahead,
    /// Head is strictly behind base
    Behind,
    /// Same commit
    Identical,
    /// Both sides have commits the other lacks
    Diverged,
    /// Value this version does not know about
    #[serde(other)]
    Unknown,
}

impl ComparisonStatus {
    /// Get string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ahead => "ahead",
            Self::Behind => "behind",
            Self::Identical => "identical",
            Self::Diverged => "diverged",
            Self::Unknown => "unknown",
        }
    }
}

/// Changed file as returned by the compare API.
///
/// The status stays a raw string: an unknown value is only an error
/// if the entry survives extension filtering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComparedFile {
    /// Path relative to the repository root
    pub filename: String,
    /// `added`, `modified`, `removed`, `renamed`, or something unexpected
    pub status: String,
}

impl ComparedFile {
    /// Create a new entry
    pub fn new(filename: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status: status.into(),
        }
    }
}

/// Body of a successful compare call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comparison {
    /// Relationship of head to base
    pub status: ComparisonStatus,
    /// Changed files in API order
    #[serde(default)]
    pub files: Vec<ComparedFile>,
}

/// Compare call outcome: HTTP status plus the body when the call succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareResponse {
    /// HTTP status code
    pub http_status: u16,
    /// Parsed body, present for successful responses
    pub body: Option<Comparison>,
}

/// Output encoding for the file lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Paths joined by a single space
    #[default]
    SpaceDelimited,
    /// Paths joined by a comma, unquoted
    Csv,
    /// JSON array of strings
    Json,
}

impl OutputFormat {
    /// Every accepted input value
    pub const VALUES: [&'static str; 3] = ["space-delimited", "csv", "json"];

    /// Get the input value naming this format
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SpaceDelimited => "space-delimited",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "space-delimited" => Ok(Self::SpaceDelimited),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(Error::Config(format!(
                "Format must be one of {}, got '{}'",
                Self::VALUES.join(", "),
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified file lists, each in API arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileGroups {
    /// Every accepted file
    pub all: Vec<String>,
    /// Added files
    pub added: Vec<String>,
    /// Modified files
    pub modified: Vec<String>,
    /// Removed files
    pub removed: Vec<String>,
    /// Renamed files (new path)
    pub renamed: Vec<String>,
    /// Added, modified and renamed files interleaved in arrival order
    pub added_modified: Vec<String>,
}

impl FileGroups {
    /// Record one file in `all`, its status bucket and, when applicable, `added_modified`
    pub fn push(&mut self, path: &str, status: ChangeStatus) {
        self.all.push(path.to_string());
        let bucket = match status {
            ChangeStatus::Added => &mut self.added,
            ChangeStatus::Modified => &mut self.modified,
            ChangeStatus::Removed => &mut self.removed,
            ChangeStatus::Renamed => &mut self.renamed,
        };
        bucket.push(path.to_string());
        if status.is_added_or_modified() {
            self.added_modified.push(path.to_string());
        }
    }

    /// Number of accepted files
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// True when no file was accepted
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
