//! Interactive prompt collaborators.
//!
//! The store itself never talks to a terminal; anything interactive goes
//! through this trait so the core stays host-agnostic and testable.
//! `None` always means the user dismissed the prompt.

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

pub trait Prompt {
    /// Ask a yes/no question. `None` if dismissed.
    fn confirm(&self, question: &str) -> Option<bool>;

    /// Pick one item from a list, returning its index. `None` if dismissed.
    fn pick(&self, title: &str, items: &[String]) -> Option<usize>;

    /// Ask for free-form text with a default value. `None` if dismissed.
    fn input(&self, question: &str, default: &str) -> Option<String>;
}

/// Console implementation over dialoguer
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn confirm(&self, question: &str) -> Option<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact_opt()
            .ok()
            .flatten()
    }

    fn pick(&self, title: &str, items: &[String]) -> Option<usize> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact_opt()
            .ok()
            .flatten()
    }

    fn input(&self, question: &str, default: &str) -> Option<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(default.to_string())
            .interact_text()
            .ok()
    }
}

/// Non-interactive prompt that accepts every question and keeps every
/// default. Used for `--yes` runs and scripting.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _question: &str) -> Option<bool> {
        Some(true)
    }

    fn pick(&self, _title: &str, _items: &[String]) -> Option<usize> {
        None
    }

    fn input(&self, _question: &str, default: &str) -> Option<String> {
        Some(default.to_string())
    }
}

/// Canned answers for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompt {
    pub confirm: Option<bool>,
    pub pick: Option<usize>,
    pub input: Option<String>,
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn confirm(&self, _question: &str) -> Option<bool> {
        self.confirm
    }

    fn pick(&self, _title: &str, _items: &[String]) -> Option<usize> {
        self.pick
    }

    fn input(&self, _question: &str, _default: &str) -> Option<String> {
        self.input.clone()
    }
}
