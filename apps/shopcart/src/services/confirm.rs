//! # Confirmation Prompt
//!
//! Asked by the controller before a decrement would drop a line from the
//! cart. The cart engine itself never asks.

use std::io::{BufRead, Write};

/// Yes/no question to the user.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Prompts on stdout and reads `y`/`yes` from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl StdinConfirm {
    fn is_yes(answer: &str) -> bool {
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => Self::is_yes(&answer),
            Err(_) => false,
        }
    }
}
