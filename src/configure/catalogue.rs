//! Commit type catalogue editor.

use console::style;

use crate::{
    config::{CommitTypeEntry, ConfigDocument, DocumentStore, is_valid_emoji_code},
    emoji::EmojiResolver,
    errors::Result,
    prompt::Prompter,
    utils::{on_off, print_error, print_info, print_separator, print_success, print_warning},
};

use super::Configurator;

const INVALID_NUMBER: &str = "Invalid option. Please choose a valid number.";
const NOT_A_NUMBER: &str = "Invalid input. Please enter a number.";
const REMOVE_EMOJI: &str = "remove";

/// Actions of the commit type menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueCommand {
    Back,
    Add,
    Delete,
    /// Edit the entry with this 1-based number. Not range checked.
    Edit(usize),
}

impl CatalogueCommand {
    /// Maps a menu token to its action, `None` for anything unknown.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "b" | "q" => Some(Self::Back),
            "a" => Some(Self::Add),
            "d" => Some(Self::Delete),
            other => other.parse().ok().map(Self::Edit),
        }
    }
}

/// What to do with an entry's emoji while editing it.
enum EmojiEdit {
    Keep,
    Remove,
    Set(String),
}

/// Numbered lines of the commit type menu.
#[must_use]
pub fn catalogue_lines(doc: &ConfigDocument, resolver: &EmojiResolver) -> Vec<String> {
    doc.commit_types
        .iter()
        .enumerate()
        .map(|(index, (key, entry))| {
            let label = entry.display_label(key);

            if doc.include_emoji && !entry.emoji.is_empty() {
                format!("{}. {label} {}", index + 1, resolver.resolve(&entry.emoji))
            } else {
                format!("{}. {label}", index + 1)
            }
        })
        .collect()
}

impl<S: DocumentStore, P: Prompter> Configurator<'_, S, P> {
    /// Runs the commit type menu until the user goes back.
    ///
    /// # Errors
    /// * If the user cancels a prompt
    /// * If the configuration cannot be written
    pub fn configure_commit_types(&mut self) -> Result<()> {
        loop {
            self.show_commit_types();

            let input = self.prompter.ask_text(
                "Choose an option or enter number to select a type (or 'b' to go back):",
            )?;

            match CatalogueCommand::parse(&input) {
                Some(CatalogueCommand::Back) => return Ok(()),
                Some(CatalogueCommand::Add) => self.add_commit_type()?,
                Some(CatalogueCommand::Delete) => self.delete_commit_type()?,
                Some(CatalogueCommand::Edit(number)) => self.edit_commit_type(number)?,
                None => print_error(NOT_A_NUMBER, ""),
            }
        }
    }

    fn show_commit_types(&self) {
        println!("{}", style("Commit Types Configuration:").bold());
        print_separator();
        println!(
            "Options: <type> is {}. <emoji> is {}.",
            on_off(self.doc.include_type),
            on_off(self.doc.include_emoji)
        );

        for line in catalogue_lines(&self.doc, self.resolver) {
            println!("{line}");
        }

        println!("a. + Add a new type");
        println!("d. - Delete a type");

        if !self.doc.include_type && !self.doc.include_emoji {
            print_warning(
                "Both <type> and <emoji> are off.",
                "You can still modify existing commit types, but they won't be used in the template.",
            );
        }

        print_separator();
    }

    fn add_commit_type(&mut self) -> Result<()> {
        let key = self
            .prompter
            .ask_text("Enter commit type key (e.g., feat, fix, ...):")?;

        if key.is_empty() {
            print_error("Commit type key cannot be empty.", "");
            return Ok(());
        }

        let emoji = loop {
            let code = self
                .prompter
                .ask_text("Enter emoji for new type (use :emoji: format, leave empty to skip):")?;

            if is_valid_emoji_code(&code)? {
                break code;
            }

            print_error("Emoji must be in :emoji: format.", "");
        };

        let description = self
            .prompter
            .ask_text("Enter a description for the new type (optional):")?;

        let stored = self
            .doc
            .commit_types
            .insert(&key, CommitTypeEntry::new(emoji.clone(), description))?;
        self.persist()?;

        log::debug!("Added commit type {stored}");
        print_success(
            "Added new type",
            &format!(
                "{} with emoji: {}",
                self.doc.commit_types.label(&stored),
                self.resolver.resolve(&emoji)
            ),
        );

        Ok(())
    }

    fn delete_commit_type(&mut self) -> Result<()> {
        let input = self
            .prompter
            .ask_text("Enter the number of the commit type to delete (or 'b' to go back):")?;

        if input.eq_ignore_ascii_case("b") {
            return Ok(());
        }

        let Ok(number) = input.parse::<usize>() else {
            print_error(NOT_A_NUMBER, "");
            return Ok(());
        };

        let Some(index) = self.checked_index(number) else {
            print_error(INVALID_NUMBER, "");
            return Ok(());
        };

        let label = self
            .doc
            .commit_types
            .get_index(index)
            .map(|(key, entry)| entry.display_label(key).to_string())
            .unwrap_or_default();

        if !self
            .prompter
            .confirm(&format!("Are you sure you want to delete '{label}'?"), false)?
        {
            print_info("Deletion cancelled.", "");
            return Ok(());
        }

        if let Some((key, _)) = self.doc.commit_types.remove_index(index) {
            self.persist()?;
            log::debug!("Deleted commit type {key}");
            print_success(&format!("Deleted commit type '{label}'."), "");
        }

        Ok(())
    }

    fn edit_commit_type(&mut self, number: usize) -> Result<()> {
        let Some(index) = self.checked_index(number) else {
            print_error(INVALID_NUMBER, "");
            return Ok(());
        };

        let Some((key, entry)) = self.doc.commit_types.get_index(index) else {
            return Ok(());
        };
        let mut label = entry.display_label(key).to_string();
        let entry = entry.clone();

        println!(
            "Editing commit type: {} ({})",
            style(&label).blue(),
            self.resolver.resolve(&entry.emoji)
        );

        let new_name = self.prompter.ask_text(&format!(
            "Enter new name for {label} (leave empty to keep the current name):"
        ))?;

        if new_name.is_empty() {
            print_info("Commit type name unchanged.", "");
        } else {
            let key = self.doc.commit_types.rename(index, &new_name)?;
            self.persist()?;
            label = self.doc.commit_types.label(&key).to_string();
            print_success(&format!("Updated commit type name to: {label}"), "");
        }

        match self.ask_emoji_edit(&label, &entry.emoji)? {
            EmojiEdit::Keep => print_info("Commit type emoji unchanged.", ""),
            EmojiEdit::Remove => {
                self.update_entry(index, |entry| entry.emoji.clear())?;
                print_success("Commit type emoji removed.", "");
            }
            EmojiEdit::Set(code) => {
                let glyph = self.resolver.resolve(&code);
                self.update_entry(index, |entry| entry.emoji = code)?;
                print_success(&format!("Updated {label} to {glyph}"), "");
            }
        }

        let current = if entry.description.is_empty() {
            String::new()
        } else {
            format!(" (current: {})", entry.description)
        };
        let description = self.prompter.ask_text(&format!(
            "Enter new description for {label}{current} (leave empty to keep current):"
        ))?;

        if !description.is_empty() {
            self.update_entry(index, |entry| entry.description = description)?;
        }

        Ok(())
    }

    fn ask_emoji_edit(&mut self, label: &str, current: &str) -> Result<EmojiEdit> {
        let message = format!(
            "Enter new emoji for {label} (current: {}) (use :emoji: format, leave empty to keep current, type '{REMOVE_EMOJI}' to delete):",
            self.resolver.resolve(current)
        );

        loop {
            let input = self.prompter.ask_text(&message)?;

            if input.is_empty() {
                return Ok(EmojiEdit::Keep);
            }
            if input.eq_ignore_ascii_case(REMOVE_EMOJI) {
                return Ok(EmojiEdit::Remove);
            }
            if is_valid_emoji_code(&input)? {
                return Ok(EmojiEdit::Set(input));
            }

            print_error("Invalid emoji format. Must be in :emoji: format.", "");
        }
    }

    fn update_entry(
        &mut self,
        index: usize,
        update: impl FnOnce(&mut CommitTypeEntry),
    ) -> Result<()> {
        if let Some(entry) = self.doc.commit_types.get_index_mut(index) {
            update(entry);
            self.persist()?;
        }

        Ok(())
    }

    /// Converts a 1-based menu number into an index of the catalogue.
    fn checked_index(&self, number: usize) -> Option<usize> {
        (1..=self.doc.commit_types.len())
            .contains(&number)
            .then(|| number - 1)
    }
}
