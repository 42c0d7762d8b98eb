use std::io;

use dialoguer::{Confirm, Input};
use fingerprint::Prompter;
use is_terminal::IsTerminal;

/// Prompts on the terminal; falls back to non-interactive behavior when
/// stdin is not a TTY or `--no-prompt` was given.
pub struct ConsolePrompter {
    interactive: bool,
}

impl ConsolePrompter {
    pub fn new(no_prompt: bool) -> Self {
        Self {
            interactive: !no_prompt && io::stdin().is_terminal(),
        }
    }
}

impl Prompter for ConsolePrompter {
    fn can_prompt(&self) -> bool {
        self.interactive
    }

    fn confirm(&self, message: &str, prompt: &str) -> io::Result<bool> {
        eprintln!("{message}");
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(io::Error::other)
    }

    fn ask(&self, message: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(message.trim())
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)
    }
}
