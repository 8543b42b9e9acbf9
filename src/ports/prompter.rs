use crate::domain::AppError;

/// Port for interactive user input.
///
/// Commands consult `is_interactive` before prompting and fall back to
/// flag-driven behavior when it returns false.
pub trait Prompter {
    /// Whether prompts can be shown (stdin and stdout are terminals).
    fn is_interactive(&self) -> bool;

    /// Ask a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, AppError>;

    /// Pick one of `items`; `None` when the user cancels.
    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, AppError>;

    /// Read a line of text; an empty answer is returned as an empty string.
    fn input(&self, prompt: &str) -> Result<String, AppError>;
}
