//! Execution hand-off for confirmed commands

use anyhow::{Context, Result};
use std::process::Command;

/// Run the command through the shell, inheriting the terminal.
///
/// Returns the child's exit code so the caller can propagate it.
pub fn run(command: &str) -> Result<i32> {
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .with_context(|| format!("Failed to run command: {}", command))?;

    Ok(status.code().unwrap_or(1))
}
