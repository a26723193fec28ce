//! Commit Flow
//!
//! The default `snippy` invocation: pick a commit type, type a subject,
//! render the template and hand the message to git.

use console::style;

use crate::{
    config::{ConfigDocument, DocumentStore},
    emoji::EmojiResolver,
    errors::{Result, SnippyError},
    git::{GitClient, commit::manual_commit_command},
    prompt::Prompter,
    template::{preview, render},
    utils::{print_separator, print_success, print_warning},
};

/// How a commit run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// git committed `message`.
    Committed { message: String },
    /// The index was empty; the user can still run `manual_command`.
    NothingStaged { manual_command: String },
}

/// The commit type picked by the user. Both fields stay empty when neither
/// toggle is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub type_label: String,
    pub emoji_code: String,
}

/// Numbered lines of the commit type picker for the current toggles.
#[must_use]
pub fn selection_lines(doc: &ConfigDocument, resolver: &EmojiResolver) -> Vec<String> {
    doc.commit_types
        .iter()
        .enumerate()
        .map(|(index, (key, entry))| {
            let number = index + 1;
            let label = entry.display_label(key);

            match (doc.include_type, doc.include_emoji) {
                (true, true) => format!("{number}. {label} ({})", resolver.resolve(&entry.emoji)),
                (false, true) => format!("{number}. {}", resolver.resolve(&entry.emoji)),
                _ => format!("{number}. {label}"),
            }
        })
        .collect()
}

/// Resolves the user's 1-based answer into a [`Selection`].
///
/// # Errors
/// * [`SnippyError::InvalidInput`] when the answer is not a number of the list
pub fn select_entry(doc: &ConfigDocument, input: &str) -> Result<Selection> {
    let invalid = || SnippyError::InvalidInput(format!("'{input}' is not a listed commit type"));

    let number: usize = input.trim().parse().map_err(|_| invalid())?;
    let (key, entry) = number
        .checked_sub(1)
        .and_then(|index| doc.commit_types.get_index(index))
        .ok_or_else(invalid)?;

    Ok(Selection {
        type_label: entry.display_label(key).to_string(),
        emoji_code: entry.emoji.clone(),
    })
}

/// Renders the final message.
///
/// An empty subject falls back to the template rendered without one and
/// trimmed; if that is empty as well the commit is refused.
///
/// # Errors
/// * [`SnippyError::EmptyMessage`] when no message can be produced
pub fn compose_message(
    doc: &ConfigDocument,
    selection: &Selection,
    subject: &str,
    resolver: &EmojiResolver,
) -> Result<String> {
    let rendered = render(
        &doc.commit_template,
        &selection.type_label,
        &selection.emoji_code,
        subject.trim(),
        doc.toggles(),
        resolver,
    );

    if !subject.trim().is_empty() {
        return Ok(rendered);
    }

    let fallback = rendered.trim();
    if fallback.is_empty() {
        return Err(SnippyError::EmptyMessage);
    }

    print_warning(
        "Empty commit message",
        &format!("Committing with \"{fallback}\" instead."),
    );

    Ok(fallback.to_string())
}

/// Runs one commit from configuration loading to `git commit`.
pub struct CommitFlow<'a, S, P, G> {
    store: &'a S,
    prompter: &'a mut P,
    git: &'a G,
    resolver: &'a EmojiResolver,
}

impl<'a, S: DocumentStore, P: Prompter, G: GitClient> CommitFlow<'a, S, P, G> {
    pub fn new(store: &'a S, prompter: &'a mut P, git: &'a G, resolver: &'a EmojiResolver) -> Self {
        Self {
            store,
            prompter,
            git,
            resolver,
        }
    }

    /// # Errors
    /// * If the configuration cannot be loaded
    /// * If the commit type answer is not a listed number
    /// * If the message ends up empty
    /// * [`SnippyError::CommitFailed`] when git exits with a non-zero status
    pub fn run(&mut self) -> Result<CommitOutcome> {
        let doc = self.store.load()?;

        println!("{}", style("Template:").bold());
        println!("  {} (e.g: {})", doc.commit_template, preview(&doc, self.resolver));
        println!();

        let selection = if doc.toggles().needs_selection() {
            println!("Select commit type:");
            print_separator();
            for line in selection_lines(&doc, self.resolver) {
                println!("{line}");
            }

            let input = self
                .prompter
                .ask_text("Choose an option or enter number to select a type:")?;
            select_entry(&doc, &input)?
        } else {
            Selection::default()
        };

        let subject = self.prompter.ask_text("Enter commit message:")?;
        let message = compose_message(&doc, &selection, &subject, self.resolver)?;

        if !self.git.has_staged_changes()? {
            let manual_command = manual_commit_command(&message);
            print_warning(
                "No staged files detected!",
                &format!("You can still commit manually using: {manual_command}"),
            );
            return Ok(CommitOutcome::NothingStaged { manual_command });
        }

        match self.git.commit(&message)? {
            0 => {
                print_success("Commit successful!", &message);
                Ok(CommitOutcome::Committed { message })
            }
            code => Err(SnippyError::CommitFailed { code }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ConfigStore,
        git::MockGitClient,
        prompt::testing::{Answer, ScriptedPrompter},
    };
    use mockall::predicate::eq;
    use tempfile::TempDir;

    fn store_with(doc: &ConfigDocument) -> (TempDir, ConfigStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::with_root(temp_dir.path());
        store.save(doc).unwrap();
        (temp_dir, store)
    }

    fn run(store: &ConfigStore, git: &MockGitClient, answers: &[&'static str]) -> Result<CommitOutcome> {
        let resolver = EmojiResolver::new();
        let mut prompter = ScriptedPrompter::texts(answers);

        CommitFlow::new(store, &mut prompter, git, &resolver).run()
    }

    #[test]
    fn test_selection_lines_per_toggles() {
        let resolver = EmojiResolver::new();
        let mut doc = ConfigDocument::default();

        assert_eq!(selection_lines(&doc, &resolver)[0], "1. feat (✨)");

        doc.include_emoji = false;
        assert_eq!(selection_lines(&doc, &resolver)[0], "1. feat");

        doc.include_emoji = true;
        doc.include_type = false;
        assert_eq!(selection_lines(&doc, &resolver)[1], "2. 🐛");
    }

    #[test]
    fn test_select_entry_bounds() {
        let doc = ConfigDocument::default();

        assert_eq!(
            select_entry(&doc, "2").unwrap(),
            Selection {
                type_label: "fix".to_string(),
                emoji_code: ":bug:".to_string()
            }
        );
        assert!(matches!(select_entry(&doc, "0"), Err(SnippyError::InvalidInput(_))));
        assert!(matches!(select_entry(&doc, "9"), Err(SnippyError::InvalidInput(_))));
        assert!(matches!(select_entry(&doc, "fix"), Err(SnippyError::InvalidInput(_))));
    }

    #[test]
    fn test_select_entry_uses_display_label() {
        let mut doc = ConfigDocument::default();
        doc.commit_types
            .insert("feat", crate::config::CommitTypeEntry::new(":rocket:", ""))
            .unwrap();

        let selection = select_entry(&doc, "9").unwrap();

        assert_eq!(selection.type_label, "feat");
        assert_eq!(selection.emoji_code, ":rocket:");
    }

    #[test]
    fn test_typed_suffix_is_kept_in_menu_and_message() {
        let resolver = EmojiResolver::new();
        let mut doc = ConfigDocument::default();
        doc.commit_types = crate::config::Catalogue::default();
        doc.commit_types
            .insert("python_3", crate::config::CommitTypeEntry::new(":snake:", ""))
            .unwrap();

        assert_eq!(selection_lines(&doc, &resolver), ["1. python_3 (🐍)"]);

        let selection = select_entry(&doc, "1").unwrap();
        assert_eq!(
            compose_message(&doc, &selection, "bump", &resolver).unwrap(),
            "python_3: 🐍 bump"
        );
    }

    #[test]
    fn test_compose_message_empty_subject_policy() {
        let resolver = EmojiResolver::new();
        let doc = ConfigDocument::default();
        let selection = select_entry(&doc, "1").unwrap();

        assert_eq!(compose_message(&doc, &selection, "  ", &resolver).unwrap(), "feat: ✨");

        let mut bare = ConfigDocument::default();
        bare.toggle_type();
        bare.toggle_emoji();
        assert!(matches!(
            compose_message(&bare, &Selection::default(), "", &resolver),
            Err(SnippyError::EmptyMessage)
        ));
    }

    #[test]
    fn test_commit_default_config() {
        let (_dir, store) = store_with(&ConfigDocument::default());
        let mut git = MockGitClient::new();
        git.expect_has_staged_changes().times(1).returning(|| Ok(true));
        git.expect_commit()
            .with(eq("feat: ✨ add login page"))
            .times(1)
            .returning(|_| Ok(0));

        let outcome = run(&store, &git, &["1", "add login page"]).unwrap();

        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                message: "feat: ✨ add login page".to_string()
            }
        );
    }

    #[test]
    fn test_commit_without_type_or_emoji_skips_selection() {
        let mut doc = ConfigDocument::default();
        doc.toggle_type();
        doc.toggle_emoji();
        let (_dir, store) = store_with(&doc);

        let mut git = MockGitClient::new();
        git.expect_has_staged_changes().returning(|| Ok(true));
        git.expect_commit()
            .with(eq("quick fix"))
            .times(1)
            .returning(|_| Ok(0));

        let outcome = run(&store, &git, &["quick fix"]).unwrap();

        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                message: "quick fix".to_string()
            }
        );
    }

    #[test]
    fn test_nothing_staged_does_not_commit() {
        let (_dir, store) = store_with(&ConfigDocument::default());
        let mut git = MockGitClient::new();
        git.expect_has_staged_changes().returning(|| Ok(false));
        git.expect_commit().never();

        let outcome = run(&store, &git, &["2", "crash on start"]).unwrap();

        assert_eq!(
            outcome,
            CommitOutcome::NothingStaged {
                manual_command: "git commit -m \"fix: 🐛 crash on start\"".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_selection_is_fatal() {
        let (_dir, store) = store_with(&ConfigDocument::default());
        let mut git = MockGitClient::new();
        git.expect_has_staged_changes().never();
        git.expect_commit().never();

        assert!(matches!(
            run(&store, &git, &["12"]),
            Err(SnippyError::InvalidInput(_))
        ));
        assert!(matches!(
            run(&store, &git, &["feat"]),
            Err(SnippyError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_message_aborts_before_git() {
        let mut doc = ConfigDocument::default();
        doc.toggle_type();
        doc.toggle_emoji();
        let (_dir, store) = store_with(&doc);
        let mut git = MockGitClient::new();
        git.expect_has_staged_changes().never();
        git.expect_commit().never();

        assert!(matches!(run(&store, &git, &[""]), Err(SnippyError::EmptyMessage)));
    }

    #[test]
    fn test_failed_commit_propagates_exit_code() {
        let (_dir, store) = store_with(&ConfigDocument::default());
        let mut git = MockGitClient::new();
        git.expect_has_staged_changes().returning(|| Ok(true));
        git.expect_commit().returning(|_| Ok(128));

        let error = run(&store, &git, &["1", "x"]).unwrap_err();

        assert!(matches!(error, SnippyError::CommitFailed { code: 128 }));
        assert_eq!(error.exit_code(), 128);
    }

    #[test]
    fn test_cancelled_prompt_stops_flow() {
        let (_dir, store) = store_with(&ConfigDocument::default());
        let git = MockGitClient::new();
        let resolver = EmojiResolver::new();
        let mut prompter = ScriptedPrompter::new([Answer::Text("1"), Answer::Cancel]);

        let result = CommitFlow::new(&store, &mut prompter, &git, &resolver).run();

        assert!(matches!(result, Err(SnippyError::UserCancelled)));
    }
}
