//! Key bindings shared by the interactive widgets.
//!
//! A [`Binding`] groups the key codes that trigger one action together with
//! the short help text shown for it.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// One action's keys and help text.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Key codes that trigger the action.
    pub keys: Vec<KeyCode>,
    /// Short label for the keys, e.g. `"enter"`.
    pub help: String,
    /// What the action does.
    pub description: String,
}

impl Binding {
    /// Creates a binding for `keys` with empty help.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: String::new(),
            description: String::new(),
        }
    }

    /// Sets the key label.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Sets the action description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether `key_msg` triggers this binding.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.keys.contains(&key_msg.key)
    }

    /// `"help description"`, or just the help when there is no description.
    pub fn help_line(&self) -> String {
        if self.description.is_empty() {
            self.help.clone()
        } else {
            format!("{} {}", self.help, self.description)
        }
    }
}

/// Joins the help lines of `bindings` into a single hint row.
pub fn short_help(bindings: &[&Binding]) -> String {
    bindings
        .iter()
        .map(|b| b.help_line())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}
