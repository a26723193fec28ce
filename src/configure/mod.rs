//! Interactive Configuration
//!
//! The `snippy config` loop: a summary of the current configuration and a
//! menu opening the template editor, the commit type editor, or resetting
//! everything to the defaults. Each editor persists its own changes.

mod catalogue;
mod template;

pub use catalogue::{CatalogueCommand, catalogue_lines};
pub use template::{TemplateCommand, ToggleChoice};

use console::style;

use crate::{
    config::{ConfigDocument, DocumentStore},
    emoji::EmojiResolver,
    errors::Result,
    prompt::Prompter,
    template::preview,
    utils::{on_off, print_error, print_info, print_separator},
};

/// Top level menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorCommand {
    Template,
    CommitTypes,
    Reset,
    Quit,
}

impl OrchestratorCommand {
    /// Maps a menu token to its action, `None` for anything unknown.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "t" => Some(Self::Template),
            "c" => Some(Self::CommitTypes),
            "r" => Some(Self::Reset),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Holds the document being edited together with everything the editors
/// need to talk to the user and persist their changes.
pub struct Configurator<'a, S, P> {
    doc: ConfigDocument,
    store: &'a S,
    prompter: &'a mut P,
    resolver: &'a EmojiResolver,
}

impl<'a, S: DocumentStore, P: Prompter> Configurator<'a, S, P> {
    pub fn new(
        doc: ConfigDocument,
        store: &'a S,
        prompter: &'a mut P,
        resolver: &'a EmojiResolver,
    ) -> Self {
        Self {
            doc,
            store,
            prompter,
            resolver,
        }
    }

    #[must_use]
    pub fn document(&self) -> &ConfigDocument {
        &self.doc
    }

    #[must_use]
    pub fn into_document(self) -> ConfigDocument {
        self.doc
    }

    /// Runs the configuration menu until the user quits.
    ///
    /// # Errors
    /// * If the user cancels a prompt
    /// * If the configuration cannot be written
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_current_configuration();

            let input = self.prompter.ask_text(
                "Do you want to configure (t)emplate, (c)ommit types, (r)eset to default, or (q)uit?",
            )?;

            match OrchestratorCommand::parse(&input) {
                Some(OrchestratorCommand::Template) => self.configure_template()?,
                Some(OrchestratorCommand::CommitTypes) => self.configure_commit_types()?,
                Some(OrchestratorCommand::Reset) => {
                    self.doc = self.store.reset()?;
                    print_info("Configuration reset to default values.", "");
                }
                Some(OrchestratorCommand::Quit) => break,
                None => print_error("Invalid option. Please choose 't', 'c', 'r', or 'q'.", ""),
            }
        }

        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.doc)
    }

    fn show_current_configuration(&self) {
        println!("{}", style("Current Configuration:").bold());
        print_separator();

        for line in configuration_summary(&self.doc, self.resolver) {
            println!("{line}");
        }

        print_separator();
    }
}

/// Lines of the configuration summary shown above the main menu.
#[must_use]
pub fn configuration_summary(doc: &ConfigDocument, resolver: &EmojiResolver) -> Vec<String> {
    let mut lines = vec![
        "Template:".to_string(),
        format!(
            "  {} (e.g: {})",
            doc.commit_template,
            preview(doc, resolver)
        ),
        String::new(),
        "Commit types:".to_string(),
        format!("  <emoji> option is {}", on_off(doc.include_emoji)),
        format!("  <type> option is {}", on_off(doc.include_type)),
        String::new(),
    ];

    for (key, entry) in doc.commit_types.iter() {
        let label = entry.display_label(key);

        match (doc.include_type, doc.include_emoji) {
            (true, true) => lines.push(format!("  {label}: {}", resolver.resolve(&entry.emoji))),
            (true, false) => lines.push(format!("  {label}")),
            (false, true) => lines.push(format!("  {}", resolver.resolve(&entry.emoji))),
            (false, false) => {}
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ConfigStore,
        errors::SnippyError,
        prompt::testing::{Answer, ScriptedPrompter},
    };
    use tempfile::TempDir;

    #[test]
    fn test_parse_orchestrator_command() {
        assert_eq!(OrchestratorCommand::parse("t"), Some(OrchestratorCommand::Template));
        assert_eq!(OrchestratorCommand::parse(" C "), Some(OrchestratorCommand::CommitTypes));
        assert_eq!(OrchestratorCommand::parse("r"), Some(OrchestratorCommand::Reset));
        assert_eq!(OrchestratorCommand::parse("q"), Some(OrchestratorCommand::Quit));
        assert_eq!(OrchestratorCommand::parse("quit"), None);
        assert_eq!(OrchestratorCommand::parse(""), None);
    }

    #[test]
    fn test_summary_filters_catalogue_by_toggles() {
        console::set_colors_enabled(false);
        let resolver = EmojiResolver::new();
        let mut doc = ConfigDocument::default();

        let lines = configuration_summary(&doc, &resolver);
        assert!(lines.contains(&"  feat: ✨".to_string()));
        assert!(lines.contains(&"  <emoji> option is on".to_string()));

        doc.toggle_emoji();
        let lines = configuration_summary(&doc, &resolver);
        assert!(lines.contains(&"  feat".to_string()));
        assert!(!lines.iter().any(|line| line.contains('✨')));

        doc.toggle_emoji();
        doc.toggle_type();
        let lines = configuration_summary(&doc, &resolver);
        assert!(lines.contains(&"  ✨".to_string()));
        assert!(!lines.contains(&"  feat".to_string()));

        doc.toggle_emoji();
        let lines = configuration_summary(&doc, &resolver);
        assert!(lines.contains(&"  <subject> (e.g: This is example comment.)".to_string()));
        assert!(!lines.iter().any(|line| line.trim() == "feat"));
    }

    #[test]
    fn test_unknown_token_then_quit_persists() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::with_root(temp_dir.path());
        let resolver = EmojiResolver::new();
        let mut prompter = ScriptedPrompter::texts(&["x", "42", "q"]);

        let mut configurator =
            Configurator::new(ConfigDocument::default(), &store, &mut prompter, &resolver);
        configurator.run().unwrap();

        assert!(prompter.is_exhausted());
        assert_eq!(store.load().unwrap(), ConfigDocument::default());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::with_root(temp_dir.path());
        let resolver = EmojiResolver::new();

        let mut doc = ConfigDocument::default();
        doc.toggle_type();
        doc.commit_types.remove_index(0);
        store.save(&doc).unwrap();

        let mut prompter = ScriptedPrompter::texts(&["r", "q"]);
        let mut configurator = Configurator::new(doc, &store, &mut prompter, &resolver);
        configurator.run().unwrap();

        assert_eq!(configurator.document(), &ConfigDocument::default());
        assert_eq!(store.load().unwrap(), ConfigDocument::default());
    }

    #[test]
    fn test_cancel_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::with_root(temp_dir.path());
        let resolver = EmojiResolver::new();
        let mut prompter = ScriptedPrompter::new([Answer::Cancel]);

        let mut configurator =
            Configurator::new(ConfigDocument::default(), &store, &mut prompter, &resolver);

        assert!(matches!(configurator.run(), Err(SnippyError::UserCancelled)));
    }

    #[test]
    fn test_full_session_through_both_editors() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::with_root(temp_dir.path());
        let resolver = EmojiResolver::new();
        let mut prompter = ScriptedPrompter::new([
            // commit types: add "wip" without emoji or description, back
            Answer::Text("c"),
            Answer::Text("a"),
            Answer::Text("wip"),
            Answer::Text(""),
            Answer::Text(""),
            Answer::Text("b"),
            // template: turn <emoji> off, back
            Answer::Text("t"),
            Answer::Text("o"),
            Answer::Select(0),
            Answer::Text("b"),
            Answer::Text("q"),
        ]);

        let mut configurator =
            Configurator::new(ConfigDocument::default(), &store, &mut prompter, &resolver);
        configurator.run().unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.commit_types.len(), 9);
        assert!(saved.commit_types.get("wip").is_some());
        assert!(!saved.include_emoji);
        assert_eq!(saved.commit_template, "<type>: <subject>");
    }
}
