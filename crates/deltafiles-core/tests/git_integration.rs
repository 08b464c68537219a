//! Parent branch detection and SHA resolution against real repositories

use assert_matches::assert_matches;
use deltafiles_core::event::EventResolver;
use deltafiles_core::git::{detect_parent_branch, ShaResolver, SystemRunner};
use deltafiles_core::{CommitRange, Error, Event};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(repo_path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .unwrap();
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

fn create_test_repo(first_branch: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo_path = dir.path();

    git(repo_path, &["init"]);
    git(repo_path, &["config", "user.name", "Test User"]);
    git(repo_path, &["config", "user.email", "test@example.com"]);
    git(repo_path, &["checkout", "-b", first_branch]);

    fs::write(repo_path.join("file.txt"), "one\n").unwrap();
    git(repo_path, &["add", "."]);
    git(repo_path, &["commit", "-m", "Initial commit"]);

    dir
}

#[tokio::test]
async fn test_detects_main_past_similar_names() {
    let repo = create_test_repo("main");
    git(repo.path(), &["branch", "feature/main-fix"]);
    git(repo.path(), &["branch", "maintenance"]);

    let runner = SystemRunner::new(repo.path());
    let parent = detect_parent_branch(&runner, "git").await.unwrap();
    assert_eq!(parent, "main");
}

#[tokio::test]
async fn test_listing_order_decides_between_parents() {
    // git lists branches alphabetically, so develop precedes master
    let repo = create_test_repo("master");
    git(repo.path(), &["branch", "develop"]);

    let runner = SystemRunner::new(repo.path());
    let parent = detect_parent_branch(&runner, "git").await.unwrap();
    assert_eq!(parent, "develop");
}

#[tokio::test]
async fn test_no_parent_branch_is_an_error() {
    let repo = create_test_repo("trunk");

    let runner = SystemRunner::new(repo.path());
    let err = detect_parent_branch(&runner, "git").await.unwrap_err();
    assert_matches!(err, Error::Config(msg) if msg.contains("trunk"));
}

#[tokio::test]
async fn test_dispatch_resolution_with_local_diff() {
    let repo = create_test_repo("main");
    git(repo.path(), &["checkout", "-b", "topic"]);
    fs::write(repo.path().join("new.txt"), "two\n").unwrap();
    git(repo.path(), &["add", "."]);
    git(repo.path(), &["commit", "-m", "Topic work"]);

    let head = ShaResolver::new(repo.path()).head_sha().unwrap();
    assert_eq!(head, git(repo.path(), &["rev-parse", "HEAD"]));

    let runner = SystemRunner::new(repo.path());
    let range = EventResolver::new(&runner, "git")
        .resolve(&Event::WorkflowDispatch { sha: head.clone() })
        .await
        .unwrap();
    assert_eq!(range, CommitRange::new("main", head));
}

#[tokio::test]
async fn test_missing_git_executable() {
    let repo = create_test_repo("main");

    let runner = SystemRunner::new(repo.path());
    let err = detect_parent_branch(&runner, "definitely-not-a-git-binary")
        .await
        .unwrap_err();
    assert_matches!(err, Error::Subprocess(_));
}
