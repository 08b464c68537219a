//! Integration tests for the detection pipeline with stubbed capabilities

use assert_matches::assert_matches;
use deltafiles_core::config::{ConfigInputs, RepositorySlug, RunConfig};
use deltafiles_core::traits::{CommandRunner, CompareCommits};
use deltafiles_core::types::{CompareResponse, ComparedFile, Comparison, ComparisonStatus};
use deltafiles_core::{detect_changes_with, CommitRange, Error, Event, Result};
use std::future::Future;
use std::sync::Mutex;

/// Comparer returning a fixed response and recording the requested range
struct StubComparer {
    response: CompareResponse,
    requested: Mutex<Option<CommitRange>>,
}

impl StubComparer {
    fn ahead(files: &[(&str, &str)]) -> Self {
        Self::with(CompareResponse {
            http_status: 200,
            body: Some(Comparison {
                status: ComparisonStatus::Ahead,
                files: files
                    .iter()
                    .map(|(name, status)| ComparedFile::new(*name, *status))
                    .collect(),
            }),
        })
    }

    fn with(response: CompareResponse) -> Self {
        Self {
            response,
            requested: Mutex::new(None),
        }
    }

    fn requested(&self) -> Option<CommitRange> {
        self.requested.lock().unwrap().clone()
    }
}

impl CompareCommits for StubComparer {
    fn compare<'a>(
        &'a self,
        _repository: &'a RepositorySlug,
        range: &'a CommitRange,
    ) -> impl Future<Output = Result<CompareResponse>> + Send + 'a {
        async move {
            *self.requested.lock().unwrap() = Some(range.clone());
            Ok(self.response.clone())
        }
    }
}

/// Runner serving a canned `git branch` listing
struct StubRunner {
    branches: &'static str,
}

impl CommandRunner for StubRunner {
    fn run<'a>(
        &'a self,
        _program: &'a str,
        args: &'a [&'a str],
    ) -> impl Future<Output = Result<String>> + Send + 'a {
        async move {
            if args.first() == Some(&"branch") {
                Ok(self.branches.to_string())
            } else {
                Ok(String::new())
            }
        }
    }
}

fn config(format: &str, extensions: &str) -> RunConfig {
    RunConfig::from_inputs(&ConfigInputs {
        token: Some("token"),
        format: Some(format),
        extensions: Some(extensions),
        event_name: Some("push"),
        repository: Some("octo/widgets"),
        ..Default::default()
    })
    .unwrap()
}

fn push() -> Event {
    Event::Push {
        before: "b1".into(),
        after: "a2".into(),
    }
}

#[tokio::test]
async fn test_extension_filter_with_csv() {
    let comparer = StubComparer::ahead(&[("x.ts", "added"), ("y.md", "removed")]);
    let runner = StubRunner { branches: "" };

    let outputs = detect_changes_with(&config("csv", ".ts"), &push(), &runner, &comparer)
        .await
        .unwrap();

    assert_eq!(outputs.all, "x.ts");
    assert_eq!(outputs.added, "x.ts");
    assert_eq!(outputs.removed, "");
    assert_eq!(outputs.get("deleted"), Some(""));
    assert_eq!(outputs.added_modified, "x.ts");
    assert_eq!(comparer.requested(), Some(CommitRange::new("b1", "a2")));
}

#[tokio::test]
async fn test_space_in_filename_fails_space_delimited() {
    let comparer = StubComparer::ahead(&[("a b.txt", "added")]);
    let runner = StubRunner { branches: "" };

    let err = detect_changes_with(&config("space-delimited", ""), &push(), &runner, &comparer)
        .await
        .unwrap_err();
    assert_matches!(err, Error::DataShape(msg) if msg.contains("space"));
}

#[tokio::test]
async fn test_space_in_filename_allowed_in_json() {
    let comparer = StubComparer::ahead(&[("a b.txt", "added"), ("c.txt", "renamed")]);
    let runner = StubRunner { branches: "" };

    let outputs = detect_changes_with(&config("json", ""), &push(), &runner, &comparer)
        .await
        .unwrap();
    assert_eq!(outputs.all, r#"["a b.txt","c.txt"]"#);
    assert_eq!(outputs.renamed, r#"["c.txt"]"#);
    assert_eq!(outputs.added_modified, r#"["a b.txt","c.txt"]"#);
}

#[tokio::test]
async fn test_pull_request_compares_branch_tips() {
    let comparer = StubComparer::ahead(&[("src/lib.rs", "modified")]);
    let runner = StubRunner { branches: "" };
    let event = Event::PullRequest {
        base_sha: "target".into(),
        head_sha: "source".into(),
    };

    let outputs = detect_changes_with(&config("space-delimited", ""), &event, &runner, &comparer)
        .await
        .unwrap();
    assert_eq!(outputs.modified, "src/lib.rs");
    assert_eq!(comparer.requested(), Some(CommitRange::new("target", "source")));
}

#[tokio::test]
async fn test_dispatch_selects_anchored_parent_branch() {
    let comparer = StubComparer::ahead(&[("README.md", "modified")]);
    let runner = StubRunner {
        branches: "feature/main-fix\nmain\n",
    };
    let event = Event::WorkflowDispatch { sha: "cafe".into() };

    detect_changes_with(&config("csv", ""), &event, &runner, &comparer)
        .await
        .unwrap();
    assert_eq!(comparer.requested(), Some(CommitRange::new("main", "cafe")));
}

#[tokio::test]
async fn test_dispatch_without_parent_branch_never_compares() {
    let comparer = StubComparer::ahead(&[("README.md", "modified")]);
    let runner = StubRunner {
        branches: "feature/main-fix\nrelease\n",
    };
    let event = Event::WorkflowDispatch { sha: "cafe".into() };

    let err = detect_changes_with(&config("csv", ""), &event, &runner, &comparer)
        .await
        .unwrap_err();
    assert_matches!(err, Error::Config(_));
    assert_eq!(comparer.requested(), None);
}

#[tokio::test]
async fn test_upstream_failure_names_event_and_status() {
    let comparer = StubComparer::with(CompareResponse {
        http_status: 500,
        body: None,
    });
    let runner = StubRunner { branches: "" };

    let err = detect_changes_with(&config("csv", ""), &push(), &runner, &comparer)
        .await
        .unwrap_err();
    assert_matches!(err, Error::Upstream(msg) if msg.contains("push") && msg.contains("500"));
}

#[tokio::test]
async fn test_diverged_comparison_fails() {
    let comparer = StubComparer::with(CompareResponse {
        http_status: 200,
        body: Some(Comparison {
            status: ComparisonStatus::Diverged,
            files: vec![ComparedFile::new("a.rs", "added")],
        }),
    });
    let runner = StubRunner { branches: "" };

    let err = detect_changes_with(&config("csv", ""), &push(), &runner, &comparer)
        .await
        .unwrap_err();
    assert_matches!(err, Error::Upstream(msg) if msg.contains("diverged"));
}

#[tokio::test]
async fn test_unknown_status_fails() {
    let comparer = StubComparer::ahead(&[("a.rs", "added"), ("b.rs", "copied")]);
    let runner = StubRunner { branches: "" };

    let err = detect_changes_with(&config("json", ""), &push(), &runner, &comparer)
        .await
        .unwrap_err();
    assert_matches!(err, Error::DataShape(msg) if msg.contains("copied"));
}

#[tokio::test]
async fn test_empty_comparison_renders_empty_groups() {
    let comparer = StubComparer::ahead(&[]);
    let runner = StubRunner { branches: "" };

    let json = detect_changes_with(&config("json", ""), &push(), &runner, &comparer)
        .await
        .unwrap();
    assert!(json.entries().iter().all(|(_, v)| *v == "[]"));

    let space = detect_changes_with(&config("space-delimited", ""), &push(), &runner, &comparer)
        .await
        .unwrap();
    assert!(space.entries().iter().all(|(_, v)| v.is_empty()));
}
