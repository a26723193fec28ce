//! Interactive Prompts
//!
//! Every question Snippy asks goes through [`Prompter`], so menus and editors
//! never depend on a particular terminal widget library.

use inquire::{Confirm, InquireError, Select, Text};

use crate::errors::PromptError;

/// Capability to ask the user something.
pub trait Prompter {
    /// Lets the user pick one of `options`, returning its index.
    ///
    /// # Errors
    /// * [`PromptError::Cancelled`] on interrupt or escape
    fn select_one(&mut self, message: &str, options: &[String]) -> Result<usize, PromptError>;

    /// Reads one line of text, trimmed.
    ///
    /// # Errors
    /// * [`PromptError::Cancelled`] on interrupt or escape
    fn ask_text(&mut self, message: &str) -> Result<String, PromptError>;

    /// Asks a yes/no question.
    ///
    /// # Errors
    /// * [`PromptError::Cancelled`] on interrupt or escape
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;
}

/// [`Prompter`] drawing on the terminal with `inquire`.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl From<InquireError> for PromptError {
    fn from(error: InquireError) -> Self {
        match error {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Cancelled
            }
            other => PromptError::Io(other.to_string()),
        }
    }
}

impl Prompter for InquirePrompter {
    fn select_one(&mut self, message: &str, options: &[String]) -> Result<usize, PromptError> {
        let choice = Select::new(message, options.to_vec()).raw_prompt()?;
        Ok(choice.index)
    }

    fn ask_text(&mut self, message: &str) -> Result<String, PromptError> {
        let answer = Text::new(message).prompt()?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        Ok(Confirm::new(message).with_default(default).prompt()?)
    }
}
