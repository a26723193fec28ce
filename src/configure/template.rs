//! Template editor: include toggles and free-text template edits.

use console::style;

use crate::{
    config::DocumentStore,
    errors::Result,
    prompt::Prompter,
    template::{TemplateIssue, preview},
    utils::{on_off, print_error, print_info, print_separator, print_success},
};

use super::Configurator;

/// Actions of the template menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCommand {
    Options,
    Edit,
    Back,
}

impl TemplateCommand {
    /// Maps a menu token to its action, `None` for anything unknown.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "o" => Some(Self::Options),
            "t" => Some(Self::Edit),
            "b" => Some(Self::Back),
            _ => None,
        }
    }
}

/// Entries of the toggle picker, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleChoice {
    Emoji,
    Type,
    Back,
}

impl ToggleChoice {
    pub const ALL: [Self; 3] = [Self::Emoji, Self::Type, Self::Back];

    fn label(self) -> &'static str {
        match self {
            Self::Emoji => "<emoji>",
            Self::Type => "<type>",
            Self::Back => "Back",
        }
    }
}

impl<S: DocumentStore, P: Prompter> Configurator<'_, S, P> {
    /// Runs the template menu until the user goes back.
    ///
    /// # Errors
    /// * If the user cancels a prompt
    /// * If the configuration cannot be written
    pub fn configure_template(&mut self) -> Result<()> {
        loop {
            self.show_current_template();

            let input = self.prompter.ask_text(
                "Do you want to configure (o)ptions or comment (t)emplate, or 'b' to go back:",
            )?;

            match TemplateCommand::parse(&input) {
                Some(TemplateCommand::Back) => return Ok(()),
                Some(TemplateCommand::Options) => self.toggle_option()?,
                Some(TemplateCommand::Edit) => self.edit_template()?,
                None => print_error("Invalid choice. Please choose 'o', 't', or 'b'.", ""),
            }
        }
    }

    fn show_current_template(&self) {
        print_separator();
        println!("{}", style("Template:").bold());
        println!(
            "  {} (e.g: {})",
            self.doc.commit_template,
            preview(&self.doc, self.resolver)
        );
        println!();
        println!("{}", style("Options:").bold());
        println!("1. <emoji> (optional): {}", on_off(self.doc.include_emoji));
        println!("2. <type> (optional): {}", on_off(self.doc.include_type));
        println!("   <subject> (*required): {}", on_off(true));
        print_separator();
    }

    /// Flips one include toggle; the template is regenerated from the
    /// canonical form, discarding earlier free-text edits.
    fn toggle_option(&mut self) -> Result<()> {
        let labels: Vec<String> = ToggleChoice::ALL
            .iter()
            .map(|choice| choice.label().to_string())
            .collect();

        let picked = self
            .prompter
            .select_one("Choose an option to toggle", &labels)?;

        let (name, enabled) = match ToggleChoice::ALL.get(picked) {
            Some(ToggleChoice::Emoji) => ("<emoji>", self.doc.toggle_emoji()),
            Some(ToggleChoice::Type) => ("<type>", self.doc.toggle_type()),
            Some(ToggleChoice::Back) | None => return Ok(()),
        };

        self.persist()?;
        log::debug!("Template regenerated as {}", self.doc.commit_template);
        print_info(&format!("{name} set to {}", on_off(enabled)), "");

        Ok(())
    }

    fn edit_template(&mut self) -> Result<()> {
        let toggles = self.doc.toggles();
        let message = format!(
            "Enter new commit template (use {}{}<subject>, or 'b' to go back):",
            if toggles.include_type { "<type>, " } else { "" },
            if toggles.include_emoji { "<emoji>, " } else { "" },
        );

        loop {
            let input = self.prompter.ask_text(&message)?;

            if input.eq_ignore_ascii_case("b") {
                return Ok(());
            }

            match self.doc.set_template(&input) {
                Ok(()) => {
                    self.persist()?;
                    print_success(&format!("Template updated to: {input}"), "");
                    return Ok(());
                }
                Err(issues) => print_error("Invalid template", &describe_issues(&issues)),
            }
        }
    }
}

fn describe_issues(issues: &[TemplateIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
