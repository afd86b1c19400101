use crate::error::{ProvisionError, Result};
use crate::traits::ConsentProvider;
use colored::Colorize;
use dialoguer::Password;
use std::io::{self, Write};

/// Asks the real user on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConsent;

impl ConsentProvider for TerminalConsent {
    fn is_elevated(&self) -> bool {
        matches!(sudo::check(), sudo::RunningAs::Root)
    }

    fn ask_password(&self, prompt: &str) -> Result<String> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| ProvisionError::PromptError(e.to_string()))
    }

    fn ask_line(&self, question: &str) -> Result<String> {
        print!("{} {} ", "?".yellow().bold(), question.blue());
        io::stdout()
            .flush()
            .map_err(|e| ProvisionError::PromptError(e.to_string()))?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .map_err(|e| ProvisionError::PromptError(e.to_string()))?;

        Ok(input)
    }
}
