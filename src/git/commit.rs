//! Commit Operations
//!
//! Staged-change detection and commit execution behind the [`GitClient`]
//! trait, so the commit flow can be exercised without a repository.

use std::process::{Command, Output};

use crate::errors::{GitError, Result};

/// The git operations the commit flow relies on.
#[cfg_attr(test, mockall::automock)]
pub trait GitClient {
    /// Whether the index holds anything to commit.
    ///
    /// # Errors
    /// * If `git diff --cached --name-only` cannot be run or fails
    fn has_staged_changes(&self) -> Result<bool>;

    /// Commits the index with `message` and returns git's exit code.
    ///
    /// # Errors
    /// * If git cannot be spawned
    fn commit(&self, message: &str) -> Result<i32>;
}

/// [`GitClient`] running the `git` executable.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitClient for GitCli {
    fn has_staged_changes(&self) -> Result<bool> {
        let output = Command::new("git")
            .args(["diff", "--cached", "--name-only"])
            .output()
            .map_err(GitError::IoError)?;

        let stdout = checked_stdout("git diff --cached --name-only", &output)?;
        let staged = stdout.lines().filter(|line| !line.trim().is_empty()).count();
        log::debug!("{staged} staged file(s)");

        Ok(staged > 0)
    }

    fn commit(&self, message: &str) -> Result<i32> {
        log::debug!("Running git commit -m {message:?}");

        let status = Command::new("git")
            .args(["commit", "-m", message])
            .status()
            .map_err(GitError::IoError)?;

        // Killed by a signal: report a generic failure.
        Ok(status.code().unwrap_or(1))
    }
}

/// Returns the stdout of a successful git command.
///
/// # Errors
/// * [`GitError::CommandFailed`] carrying stderr when the command failed
fn checked_stdout(command: &str, output: &Output) -> Result<String> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(GitError::CommandFailed {
            command: command.to_string(),
            output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into())
    }
}

/// The command a user can run to commit by hand.
///
/// ```
/// use snippy::git::commit::manual_commit_command;
///
/// assert_eq!(manual_commit_command("feat: add"), "git commit -m \"feat: add\"");
/// ```
#[must_use]
pub fn manual_commit_command(message: &str) -> String {
    format!("git commit -m \"{}\"", message.replace('"', "\\\""))
}
