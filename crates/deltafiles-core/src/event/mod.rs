//! Triggering events and their payloads

pub mod resolver;

pub use resolver::EventResolver;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Event kinds this tool knows how to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Pull request opened or updated
    PullRequest,
    /// Branch push
    Push,
    /// Manual run
    WorkflowDispatch,
}

impl EventKind {
    /// Event name as used by the workflow runner
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PullRequest => "pull_request",
            Self::Push => "push",
            Self::WorkflowDispatch => "workflow_dispatch",
        }
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pull_request" => Ok(Self::PullRequest),
            "push" => Ok(Self::Push),
            "workflow_dispatch" => Ok(Self::WorkflowDispatch),
            other => Err(Error::UnsupportedEvent(format!(
                "'{}' is not supported; expected pull_request, push or workflow_dispatch",
                other
            ))),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A triggering event carrying exactly the fields its resolution needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `push`: commits before and after the push
    Push {
        /// Tip before the push
        before: String,
        /// Tip after the push
        after: String,
    },
    /// `pull_request`: target and source branch tips
    PullRequest {
        /// Target branch tip
        base_sha: String,
        /// Source branch tip
        head_sha: String,
    },
    /// `workflow_dispatch`: only the current commit is known
    WorkflowDispatch {
        /// Commit the run was dispatched on
        sha: String,
    },
}

#[derive(Deserialize)]
struct PushPayload {
    before: Option<String>,
    after: Option<String>,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    pull_request: Option<PullRequestRefs>,
}

#[derive(Deserialize)]
struct PullRequestRefs {
    base: Option<CommitPointer>,
    head: Option<CommitPointer>,
}

#[derive(Deserialize)]
struct CommitPointer {
    sha: Option<String>,
}

fn required(value: Option<String>, kind: EventKind, field: &str) -> Result<String> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| {
        Error::EventParse(format!("{} payload is missing '{}'", kind, field))
    })
}

impl Event {
    /// Build an event from its kind, payload and the current commit.
    ///
    /// `current_sha` is only consulted for `workflow_dispatch`.
    pub fn from_payload(kind: EventKind, payload: &Value, current_sha: Option<&str>) -> Result<Self> {
        let shape_err =
            |e: serde_json::Error| Error::EventParse(format!("Malformed {} payload: {}", kind, e));

        match kind {
            EventKind::Push => {
                let p = PushPayload::deserialize(payload).map_err(shape_err)?;
                Ok(Self::Push {
                    before: required(p.before, kind, "before")?,
                    after: required(p.after, kind, "after")?,
                })
            }
            EventKind::PullRequest => {
                let p = PullRequestPayload::deserialize(payload).map_err(shape_err)?;
                let pr = p.pull_request.ok_or_else(|| {
                    Error::EventParse(format!("{} payload is missing 'pull_request'", kind))
                })?;
                Ok(Self::PullRequest {
                    base_sha: required(pr.base.and_then(|b| b.sha), kind, "pull_request.base.sha")?,
                    head_sha: required(pr.head.and_then(|h| h.sha), kind, "pull_request.head.sha")?,
                })
            }
            EventKind::WorkflowDispatch => Ok(Self::WorkflowDispatch {
                sha: required(current_sha.map(str::to_string), kind, "sha")?,
            }),
        }
    }

    /// Kind of this event
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Push { .. } => EventKind::Push,
            Self::PullRequest { .. } => EventKind::PullRequest,
            Self::WorkflowDispatch { .. } => EventKind::WorkflowDispatch,
        }
    }
}

/// Read the JSON event payload written by the workflow runner.
///
/// Without a path the payload is an empty object.
pub fn load_payload(path: Option<&Path>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::Object(Default::default()));
    };
    let raw = std::fs::read_to_string(path).map_err(|e| {
        Error::EventParse(format!("Cannot read event payload {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Top-level payload keys, for diagnostics
pub fn payload_keys(payload: &Value) -> Vec<&str> {
    payload
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
