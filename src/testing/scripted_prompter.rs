use std::cell::RefCell;
use std::collections::VecDeque;

use crate::domain::AppError;
use crate::ports::Prompter;

/// One queued answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    Select(Option<usize>),
    Input(String),
}

/// Replays queued answers and records every prompt shown.
pub struct ScriptedPrompter {
    interactive: bool,
    answers: RefCell<VecDeque<Answer>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    /// A prompter that reports no terminal; any prompt is a test failure.
    pub fn non_interactive() -> Self {
        Self { interactive: false, answers: RefCell::default(), prompts: RefCell::default() }
    }

    pub fn with_answers(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            interactive: true,
            answers: RefCell::new(answers.into_iter().collect()),
            prompts: RefCell::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, prompt: &str) -> Answer {
        assert!(self.interactive, "unexpected prompt without a terminal: {prompt}");
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for prompt: {prompt}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool, AppError> {
        match self.next(prompt) {
            Answer::Confirm(value) => Ok(value),
            other => panic!("expected confirm answer for {prompt}, got {other:?}"),
        }
    }

    fn select(&self, prompt: &str, _items: &[String]) -> Result<Option<usize>, AppError> {
        match self.next(prompt) {
            Answer::Select(value) => Ok(value),
            other => panic!("expected select answer for {prompt}, got {other:?}"),
        }
    }

    fn input(&self, prompt: &str) -> Result<String, AppError> {
        match self.next(prompt) {
            Answer::Input(value) => Ok(value),
            other => panic!("expected input answer for {prompt}, got {other:?}"),
        }
    }
}
