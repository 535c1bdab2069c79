//! User confirmation of a resolved command
//!
//! The resolver stays I/O-free by asking through the [`Confirmation`]
//! trait; the binary plugs in the interactive prompt, tests plug in
//! scripted answers.

use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

use crate::sources::Answer;

/// Decides whether a resolved command is accepted
pub trait Confirmation {
    /// Present the answer and ask. `Ok(false)` abandons without error.
    fn confirm(&mut self, answer: &Answer) -> Result<bool>;
}

/// Prompt on the terminal, defaulting to "no"
pub struct InteractiveConfirmation;

impl Confirmation for InteractiveConfirmation {
    fn confirm(&mut self, answer: &Answer) -> Result<bool> {
        println!(
            "{}  {}",
            answer.command.bold(),
            format!("[{}]", answer.origin).dimmed()
        );

        // Piped stdin cannot answer the prompt; print the command and
        // leave it unconfirmed
        if !atty::is(atty::Stream::Stdin) {
            debug!("stdin is not a tty, leaving the command unconfirmed");
            return Ok(false);
        }

        print!("Use this command? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim();
        Ok(input.eq_ignore_ascii_case("y") || input.eq_ignore_ascii_case("yes"))
    }
}
