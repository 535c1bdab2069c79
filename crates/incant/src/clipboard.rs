//! Clipboard hand-off for confirmed commands

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Put the command on the system clipboard
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to open clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to copy command to clipboard")
}
