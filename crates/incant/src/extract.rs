//! Command extraction from raw model output
//!
//! The model continues the few-shot prompt, so the generated text normally
//! starts with a verbatim echo of the prompt followed by the answer. This
//! module locates the answer region and cleans the first command line:
//! - Exact prompt echo: split on the prompt text, read what follows
//! - Mangled echo: find the line nearest the query by edit distance and
//!   read the lines after it
//! - Prompt echoed more than once: refuse rather than guess

use thiserror::Error;

use crate::matcher;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no command found in model output")]
    NoCommandFound,

    #[error("prompt occurs {0} times in model output")]
    AmbiguousPrompt(usize),
}

/// Pull the command out of `generated`, the model's continuation of
/// `prompt` for the given `query`.
pub fn extract(generated: &str, prompt: &str, query: &str) -> Result<String, ExtractError> {
    let parts: Vec<&str> = generated.split(prompt).collect();

    let candidates: Vec<&str> = match parts.len() {
        // Prompt echoed exactly once: the answer region follows it
        2 => parts[1].lines().collect(),

        // No exact echo: everything after the line nearest the query
        1 => {
            let lines: Vec<&str> = generated.lines().collect();
            match matcher::nearest_line(query, &lines) {
                Some(idx) => lines[idx + 1..].to_vec(),
                None => Vec::new(),
            }
        }

        n => return Err(ExtractError::AmbiguousPrompt(n - 1)),
    };

    let line = candidates
        .into_iter()
        .find(|line| !line.trim().is_empty())
        .ok_or(ExtractError::NoCommandFound)?;

    let command = sanitize_command(line);
    if command.is_empty() {
        return Err(ExtractError::NoCommandFound);
    }

    Ok(command)
}

/// Strip markup the model wraps around a command line.
///
/// The first whitespace token keeps only its alphanumeric characters, which
/// removes backticks, `$` prompts, and list bullets glued to the program
/// name. Later tokens carry flags, paths, and quoting, and are left alone.
/// Tokens are rejoined with single spaces; a first token emptied by the
/// stripping is dropped.
pub fn sanitize_command(line: &str) -> String {
    let mut tokens = line.split_whitespace();
    let first = match tokens.next() {
        Some(token) => token,
        None => return String::new(),
    };

    let first: String = first.chars().filter(|c| c.is_alphanumeric()).collect();

    let mut parts: Vec<&str> = Vec::new();
    if !first.is_empty() {
        parts.push(&first);
    }
    parts.extend(tokens);
    parts.join(" ")
}
