//! User interaction capability

use crate::error::{Error, Result};
use console::Term;
use dialoguer::Confirm;
use tracing::debug;

/// Narrow interface for the few questions commands ask
pub trait Prompter: Send + Sync {
    /// Whether a live terminal is available for prompts
    fn is_interactive(&self) -> bool;

    /// Ask a yes/no question; returns `default` when not interactive
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Open a URL in the user's browser
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Prompter backed by the real terminal
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    /// Interactive when stdout is a terminal and not explicitly disabled
    pub fn new(non_interactive: bool) -> Self {
        Self {
            interactive: !non_interactive && Term::stdout().is_term(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        if !self.interactive {
            return Ok(default);
        }
        // Esc or q counts as cancellation
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact_opt()?
            .ok_or(Error::Cancelled)
    }

    fn open_url(&self, url: &str) -> Result<()> {
        debug!(url, "opening in browser");
        open::that(url)?;
        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedPrompter;

#[cfg(any(test, feature = "test-utils"))]
mod scripted {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Prompter answering from a queue and recording opened URLs
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        interactive: bool,
        answers: Mutex<VecDeque<bool>>,
        questions: Mutex<Vec<String>>,
        opened: Mutex<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn non_interactive() -> Self {
            Self::default()
        }

        pub fn interactive<I: IntoIterator<Item = bool>>(answers: I) -> Self {
            Self {
                interactive: true,
                answers: Mutex::new(answers.into_iter().collect()),
                ..Self::default()
            }
        }

        pub fn questions(&self) -> Vec<String> {
            self.questions.lock().map(|q| q.clone()).unwrap_or_default()
        }

        pub fn opened_urls(&self) -> Vec<String> {
            self.opened.lock().map(|o| o.clone()).unwrap_or_default()
        }
    }

    impl Prompter for ScriptedPrompter {
        fn is_interactive(&self) -> bool {
            self.interactive
        }

        fn confirm(&self, message: &str, default: bool) -> Result<bool> {
            if !self.interactive {
                return Ok(default);
            }
            if let Ok(mut questions) = self.questions.lock() {
                questions.push(message.to_string());
            }
            Ok(self
                .answers
                .lock()
                .ok()
                .and_then(|mut a| a.pop_front())
                .unwrap_or(default))
        }

        fn open_url(&self, url: &str) -> Result<()> {
            if let Ok(mut opened) = self.opened.lock() {
                opened.push(url.to_string());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_non_interactive_uses_default() {
        let prompter = TerminalPrompter::new(true);
        assert!(!prompter.is_interactive());
        assert!(prompter.confirm("Continue?", true).unwrap());
        assert!(!prompter.confirm("Continue?", false).unwrap());
    }

    #[test]
    fn test_scripted_answers_in_order() {
        let prompter = ScriptedPrompter::interactive([false, true]);
        assert!(!prompter.confirm("first", true).unwrap());
        assert!(prompter.confirm("second", false).unwrap());
        assert!(prompter.confirm("third", true).unwrap());
        assert_eq!(prompter.questions(), vec!["first", "second", "third"]);
    }
}
