//! Error types for deltafiles-core

use thiserror::Error;

/// Result type alias for deltafiles operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for deltafiles operations
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid input
    #[error("Configuration error: {0}")]
    Config(String),

    /// Event kind outside pull_request, push and workflow_dispatch
    #[error("Unsupported event: {0}")]
    UnsupportedEvent(String),

    /// Event payload could not be read or lacks a required field
    #[error("Event parse error: {0}")]
    EventParse(String),

    /// Compare API failure (transport, status code or comparison status)
    #[error("Upstream API error: {0}")]
    Upstream(String),

    /// Executable missing or exited unsuccessfully
    #[error("Subprocess error: {0}")]
    Subprocess(String),

    /// Data that cannot be classified or encoded
    #[error("Unexpected data: {0}")]
    DataShape(String),

    /// libgit2 error
    #[error("Git error: {0}")]
    Git(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<git2::Error> for Error {
    fn from(err: git2::Error) -> Self {
        Error::Git(err.message().to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(err.without_url().to_string())
    }
}

/// Fieldless error category for cheap matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// Unsupported event kind
    UnsupportedEvent,
    /// Event payload error
    EventParse,
    /// Compare API error
    Upstream,
    /// Subprocess error
    Subprocess,
    /// Unclassifiable data
    DataShape,
    /// libgit2 error
    Git,
    /// I/O error
    Io,
    /// JSON error
    Json,
}

impl Error {
    /// Get the error kind
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::UnsupportedEvent(_) => ErrorKind::UnsupportedEvent,
            Error::EventParse(_) => ErrorKind::EventParse,
            Error::Upstream(_) => ErrorKind::Upstream,
            Error::Subprocess(_) => ErrorKind::Subprocess,
            Error::DataShape(_) => ErrorKind::DataShape,
            Error::Git(_) => ErrorKind::Git,
            Error::Io(_) => ErrorKind::Io,
            Error::Json(_) => ErrorKind::Json,
        }
    }

    /// Borrow the error message
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::UnsupportedEvent(msg)
            | Error::EventParse(msg)
            | Error::Upstream(msg)
            | Error::Subprocess(msg)
            | Error::DataShape(msg)
            | Error::Git(msg) => msg,
            Error::Io(_) => "I/O error",
            Error::Json(_) => "JSON error",
        }
    }
}
