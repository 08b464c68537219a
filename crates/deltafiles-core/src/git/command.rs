//! Subprocess execution with stdout capture

use std::ffi::OsStr;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::traits::CommandRunner;

/// Runs executables found on `PATH` from a fixed working directory
#[derive(Debug, Clone)]
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    /// Create a runner executing in `cwd`
    pub fn new<P: AsRef<Path>>(cwd: P) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }
}

/// Locate `program` before running it.
///
/// A name containing a path separator is checked as-is; a bare name is searched on `PATH`.
pub fn locate_executable(program: &str) -> Result<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return if candidate.is_file() {
            Ok(candidate.to_path_buf())
        } else {
            Err(Error::Subprocess(format!("Executable not found: {}", program)))
        };
    }

    let path_var = std::env::var_os("PATH").unwrap_or_default();
    search_path(program, &path_var)
        .ok_or_else(|| Error::Subprocess(format!("Unable to locate executable '{}' on PATH", program)))
}

fn search_path(program: &str, path_var: &OsStr) -> Option<PathBuf> {
    for dir in std::env::split_paths(path_var) {
        let full = dir.join(program);
        if full.is_file() {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = full.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

impl CommandRunner for SystemRunner {
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [&'a str],
    ) -> impl Future<Output = Result<String>> + Send + 'a {
        async move {
            let executable = locate_executable(program)?;
            tracing::debug!(program = %executable.display(), ?args, "Running subprocess");

            let output = tokio::process::Command::new(&executable)
                .args(args)
                .current_dir(&self.cwd)
                .kill_on_drop(true)
                .output()
                .await
                .map_err(|e| Error::Subprocess(format!("Failed to run {}: {}", program, e)))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(Error::Subprocess(format!(
                    "{} {} exited with {}: {}",
                    program,
                    args.join(" "),
                    output.status,
                    stderr.trim()
                )));
            }

            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_locate_missing_executable() {
        let err = locate_executable("definitely-not-a-real-binary-4b825dc6").unwrap_err();
        assert_matches!(err, Error::Subprocess(msg) if msg.contains("PATH"));
    }

    #[test]
    fn test_locate_explicit_missing_path() {
        let err = locate_executable("/nonexistent/dir/git").unwrap_err();
        assert_matches!(err, Error::Subprocess(_));
    }

    #[test]
    fn test_search_path_finds_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("tool"), "").unwrap();
        let path_var = std::env::join_paths([dir.path()]).unwrap();
        assert_eq!(
            search_path("tool", &path_var),
            Some(dir.path().join("tool"))
        );
        assert_eq!(search_path("other", &path_var), None);
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = SystemRunner::new(".");
        let out = runner.run("git", &["--version"]).await.unwrap();
        assert!(out.starts_with("git version"));
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let runner = SystemRunner::new(dir.path());
        // Not a repository
        let err = runner.run("git", &["rev-parse", "HEAD"]).await.unwrap_err();
        assert_matches!(err, Error::Subprocess(msg) if msg.contains("rev-parse"));
    }
}
