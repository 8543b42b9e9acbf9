use std::io::{ErrorKind, IsTerminal};

use dialoguer::{Confirm, Error as DialoguerError, Input, Select};

use crate::domain::AppError;
use crate::ports::Prompter;

/// Prompts on the controlling terminal with dialoguer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn interaction_error(what: &str, err: DialoguerError) -> AppError {
    match err {
        DialoguerError::IO(io) if io.kind() == ErrorKind::Interrupted => {
            AppError::Interaction("Operation cancelled".to_string())
        }
        err => AppError::Interaction(format!("Failed to read {}: {}", what, err)),
    }
}

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, AppError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|err| interaction_error("confirmation", err))
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, AppError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(|err| interaction_error("selection", err))
    }

    fn input(&self, prompt: &str) -> Result<String, AppError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map(|value| value.trim().to_string())
            .map_err(|err| interaction_error("input", err))
    }
}
