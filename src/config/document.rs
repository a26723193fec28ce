//! Configuration Document
//!
//! The persisted unit: the commit template, the include toggles and the
//! ordered catalogue of commit types.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{ConfigError, Result, SnippyError},
    template::{CANONICAL_TEMPLATE, TemplateIssue, Toggles, normalized_template, validate},
};

/// Keys, emoji codes and descriptions of the built-in catalogue.
const BUILTIN_TYPES: [(&str, &str, &str); 8] = [
    ("feat", ":sparkles:", "New Feature"),
    ("fix", ":bug:", "Bug Fix"),
    ("docs", ":memo:", "Documentation"),
    ("style", ":lipstick:", "Code Style"),
    ("refactor", ":recycle:", "Code Refactoring"),
    ("perf", ":zap:", "Performance Improvement"),
    ("test", ":white_check_mark:", "Test Code"),
    ("chore", ":wrench:", "Build Process or Auxiliary Tools"),
];

/// Whether `code` is acceptable as an emoji code: empty or `:name:`.
///
/// # Errors
/// * If the regex pattern fails to compile
pub fn is_valid_emoji_code(code: &str) -> Result<bool> {
    if code.is_empty() {
        return Ok(true);
    }

    Ok(get_regex_emoji_code()?.is_match(code))
}

/// Returns the regex matching a `:name:` shortcode.
///
/// # Errors
/// * If the regex cannot be compiled
fn get_regex_emoji_code() -> Result<Regex> {
    Regex::new(r"^:[A-Za-z0-9_+\-]+:$").map_err(|e| ConfigError::RegexError(e).into())
}

/// One commit type of the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct CommitTypeEntry {
    /// `:name:` shortcode, empty when the type has no emoji.
    pub emoji: String,
    /// Informational only.
    pub description: String,
    /// The key as the user typed it when a `_N` suffix had to be appended;
    /// empty when the stored key is the typed one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
}

impl CommitTypeEntry {
    #[must_use]
    pub fn new(emoji: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            emoji: emoji.into(),
            description: description.into(),
            label: String::new(),
        }
    }

    /// Name shown and committed for this entry stored under `key`.
    #[must_use]
    pub fn display_label<'a>(&'a self, key: &'a str) -> &'a str {
        if self.label.is_empty() {
            key
        } else {
            &self.label
        }
    }
}

/// Shapes accepted on read: a bare emoji code or the full object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Code(String),
    Full {
        #[serde(default)]
        emoji: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        label: String,
    },
}

impl From<RawEntry> for CommitTypeEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Code(emoji) => Self::new(emoji, ""),
            RawEntry::Full {
                emoji,
                description,
                label,
            } => Self {
                emoji,
                description,
                label,
            },
        }
    }
}

/// Ordered mapping of commit type key to entry.
///
/// Insertion order is the display and selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue(IndexMap<String, CommitTypeEntry>);

impl Catalogue {
    /// The eight built-in commit types.
    #[must_use]
    pub fn builtin() -> Self {
        Self(
            BUILTIN_TYPES
                .iter()
                .map(|(key, emoji, description)| {
                    ((*key).to_string(), CommitTypeEntry::new(*emoji, *description))
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CommitTypeEntry)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CommitTypeEntry> {
        self.0.get(key)
    }

    #[must_use]
    pub fn first(&self) -> Option<(&String, &CommitTypeEntry)> {
        self.0.first()
    }

    /// Entry at a 0-based position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&String, &CommitTypeEntry)> {
        self.0.get_index(index)
    }

    /// Display label of the entry stored under `key`, `key` itself when
    /// there is no such entry.
    #[must_use]
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.0
            .get_key_value(key)
            .map_or(key, |(stored, entry)| entry.display_label(stored))
    }

    /// Mutable entry at a 0-based position.
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut CommitTypeEntry> {
        self.0.get_index_mut(index).map(|(_, entry)| entry)
    }

    /// Appends a new commit type and returns the key it was stored under.
    ///
    /// A key already present is never overwritten: the new entry gets the
    /// first free `key_N` instead and remembers `key` as its label.
    ///
    /// # Errors
    /// * If `key` is empty or only whitespace
    pub fn insert(&mut self, key: &str, mut entry: CommitTypeEntry) -> Result<String> {
        let key = Self::checked_key(key)?;
        let stored = self.unique_key(key, None);

        entry.label = collision_label(key, &stored);
        self.0.insert(stored.clone(), entry);
        Ok(stored)
    }

    /// Renames the entry at `index`, keeping its position, and returns the
    /// key it ends up under. A collision with another entry is suffixed the
    /// same way [`Catalogue::insert`] does.
    ///
    /// # Errors
    /// * If `new_key` is empty or only whitespace
    /// * If `index` is out of range
    pub fn rename(&mut self, index: usize, new_key: &str) -> Result<String> {
        let new_key = Self::checked_key(new_key)?;

        let current = self
            .0
            .get_index(index)
            .map(|(key, _)| key.clone())
            .ok_or_else(|| SnippyError::InvalidInput(format!("no commit type at {}", index + 1)))?;

        if current == new_key {
            if let Some(entry) = self.get_index_mut(index) {
                entry.label.clear();
            }
            return Ok(current);
        }

        let stored = self.unique_key(new_key, Some(index));

        if let Some((_, mut entry)) = self.0.shift_remove_index(index) {
            entry.label = collision_label(new_key, &stored);
            self.0.shift_insert(index, stored.clone(), entry);
        }

        Ok(stored)
    }

    /// Removes the entry at `index`, keeping the order of the others.
    pub fn remove_index(&mut self, index: usize) -> Option<(String, CommitTypeEntry)> {
        self.0.shift_remove_index(index)
    }

    fn checked_key(key: &str) -> Result<&str> {
        let key = key.trim();

        if key.is_empty() {
            return Err(SnippyError::InvalidInput(
                "commit type key cannot be empty".to_string(),
            ));
        }

        Ok(key)
    }

    /// First of `key`, `key_1`, `key_2`, … not used by any entry other than
    /// the one at `except`.
    fn unique_key(&self, key: &str, except: Option<usize>) -> String {
        let taken = |candidate: &str| {
            self.0
                .get_index_of(candidate)
                .is_some_and(|index| Some(index) != except)
        };

        if !taken(key) {
            return key.to_string();
        }

        (1..)
            .map(|suffix| format!("{key}_{suffix}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| key.to_string())
    }
}

/// Label to remember for an entry typed as `typed` and stored as `stored`.
fn collision_label(typed: &str, stored: &str) -> String {
    if typed == stored {
        String::new()
    } else {
        typed.to_string()
    }
}

fn default_template() -> String {
    CANONICAL_TEMPLATE.to_string()
}

fn enabled() -> bool {
    true
}

/// The configuration persisted by [`crate::config::ConfigStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default = "default_template")]
    pub commit_template: String,

    #[serde(default = "Catalogue::builtin")]
    pub commit_types: Catalogue,

    #[serde(default = "enabled")]
    pub include_type: bool,

    #[serde(default = "enabled")]
    pub include_emoji: bool,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            commit_template: default_template(),
            commit_types: Catalogue::builtin(),
            include_type: true,
            include_emoji: true,
        }
    }
}

impl ConfigDocument {
    #[must_use]
    pub fn toggles(&self) -> Toggles {
        Toggles {
            include_type: self.include_type,
            include_emoji: self.include_emoji,
        }
    }

    /// Flips `include_type` and regenerates the template. Returns the new state.
    pub fn toggle_type(&mut self) -> bool {
        self.include_type = !self.include_type;
        self.commit_template = normalized_template(self.toggles());
        self.include_type
    }

    /// Flips `include_emoji` and regenerates the template. Returns the new state.
    pub fn toggle_emoji(&mut self) -> bool {
        self.include_emoji = !self.include_emoji;
        self.commit_template = normalized_template(self.toggles());
        self.include_emoji
    }

    /// Replaces the template if it satisfies the current toggles.
    ///
    /// # Errors
    /// Every unmet requirement; the document is left untouched.
    pub fn set_template(&mut self, template: &str) -> std::result::Result<(), Vec<TemplateIssue>> {
        let issues = validate(template, self.toggles());

        if issues.is_empty() {
            self.commit_template = template.to_string();
            Ok(())
        } else {
            Err(issues)
        }
    }
}
