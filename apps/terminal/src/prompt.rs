//! # Confirmations
//!
//! Handlers that destroy data ask first. They ask through [`Prompter`] so the
//! interactive shell can use `inquire` while tests script the answers.

use inquire::{Confirm, InquireError};

use crate::error::AppResult;

pub trait Prompter {
    /// Yes/no question. Cancelling counts as "no".
    fn confirm(&mut self, message: &str) -> AppResult<bool>;
}

/// Terminal prompts via `inquire`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn confirm(&mut self, message: &str) -> AppResult<bool> {
        match Confirm::new(message).with_default(false).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Answers from a fixed script; records every question asked.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<bool>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> AppResult<bool> {
        self.asked.push(message.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
