//! Git Operations Module
//!
//! The few git commands Snippy needs: locating the repository, probing the
//! index for staged changes and running the commit itself.

pub mod commit;
pub mod repository;

pub use commit::{GitCli, GitClient};
pub use repository::find_git_root;

#[cfg(test)]
pub use commit::MockGitClient;
