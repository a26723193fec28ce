use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the Snippy application
#[derive(Error, Debug)]
pub enum SnippyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[source] PromptError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Commit message cannot be empty")]
    EmptyMessage,

    #[error("No staged changes, nothing was committed")]
    NothingStaged,

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("git commit exited with status {code}")]
    CommitFailed { code: i32 },

    #[error("Command execution failed: {command}")]
    CommandFailed { command: String },
}

impl From<PromptError> for SnippyError {
    fn from(error: PromptError) -> Self {
        match error {
            PromptError::Cancelled => SnippyError::UserCancelled,
            other => SnippyError::Prompt(other),
        }
    }
}

impl SnippyError {
    /// Exit status the process should terminate with for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            SnippyError::UserCancelled => 130,
            SnippyError::CommitFailed { code } => *code,
            _ => 1,
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error while accessing config: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration file {} is malformed: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Could not serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Could not determine home directory - please set HOME or SNIPPY_HOME")]
    HomeDirNotFound,

    #[error("Invalid settings: {0}")]
    Settings(#[from] ::config::ConfigError),
}

/// Git-related errors
#[derive(Error, Debug)]
pub enum GitError {
    #[error("IO error during git operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Not in a git repository - please run this command from within a git repository")]
    RepositoryNotFound,

    #[error("Git command failed: {command}\nOutput: {output}")]
    CommandFailed { command: String, output: String },
}

/// Errors raised by interactive prompts
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("prompt failed: {0}")]
    Io(String),
}

/// Type alias for Result using `SnippyError`
pub type Result<T> = std::result::Result<T, SnippyError>;
