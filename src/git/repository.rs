//! Repository Operations
//!
//! Repository detection for the commit flow.

use std::{path::PathBuf, process::Command};

use crate::errors::{GitError, Result};

/// Finds the `.git` directory of the repository containing the working
/// directory.
///
/// This function uses `git rev-parse --git-dir`, so it works from any
/// subdirectory within a git repository.
///
/// # Errors
///
/// Returns an error if:
/// - Not currently in a git repository
/// - The git command fails to execute
///
/// # Examples
///
/// ```no_run
/// use snippy::git::find_git_root;
///
/// match find_git_root() {
///     Ok(git_dir) => println!("Git directory: {}", git_dir.display()),
///     Err(e) => eprintln!("Not in a git repository: {}", e),
/// }
/// ```
pub fn find_git_root() -> Result<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map_err(GitError::IoError)?;

    if !output.status.success() {
        return Err(GitError::RepositoryNotFound.into());
    }

    let git_root = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
    log::debug!("Git directory found at {}", git_root.display());

    if git_root.exists() {
        Ok(git_root)
    } else {
        Err(GitError::RepositoryNotFound.into())
    }
}
