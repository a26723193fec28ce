//! Configuration Management Module for Snippy
//!
//! This module handles all configuration-related functionality, including
//! - The persisted document (template, toggles, commit type catalogue)
//! - Reading and writing it as JSON at `~/.snippy/config.json`
//! - Environment driven application settings
//!
//! # Configuration Structure
//!
//! ```json
//! {
//!     "commit_template": "<type>: <emoji> <subject>",
//!     "commit_types": {
//!         "feat": { "emoji": ":sparkles:", "description": "New Feature" }
//!     },
//!     "include_type": true,
//!     "include_emoji": true
//! }
//! ```

pub mod document;
pub mod settings;
pub mod store;

pub use document::{Catalogue, CommitTypeEntry, ConfigDocument, is_valid_emoji_code};
pub use settings::Settings;
pub use store::{ConfigStore, DocumentStore};

#[cfg(test)]
pub use store::MockDocumentStore;
