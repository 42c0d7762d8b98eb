use std::io;

/// Console interaction used to resolve ambiguity.
pub trait Prompter {
    /// Whether a user is available to answer.
    fn can_prompt(&self) -> bool;

    /// Show `message` and ask a yes/no question.
    fn confirm(&self, message: &str, prompt: &str) -> io::Result<bool>;

    /// Ask for a free-text answer; an empty string means "no answer".
    fn ask(&self, message: &str) -> io::Result<String>;
}

impl<T: Prompter + ?Sized> Prompter for &T {
    fn can_prompt(&self) -> bool {
        (**self).can_prompt()
    }

    fn confirm(&self, message: &str, prompt: &str) -> io::Result<bool> {
        (**self).confirm(message, prompt)
    }

    fn ask(&self, message: &str) -> io::Result<String> {
        (**self).ask(message)
    }
}

/// For scripts and CI: never asks, accepts every confirmation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn can_prompt(&self) -> bool {
        false
    }

    fn confirm(&self, _message: &str, _prompt: &str) -> io::Result<bool> {
        Ok(true)
    }

    fn ask(&self, _message: &str) -> io::Result<String> {
        Ok(String::new())
    }
}
