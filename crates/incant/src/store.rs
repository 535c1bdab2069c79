//! Example store: the query/command pairs behind cache hits and few-shot prompts
//!
//! One JSON file holding an array of `["<query>", "<command>"]` pairs:
//! ~/.local/share/incant/examples.json by default. The same data serves two
//! purposes: exact-match cache lookups, and the worked examples rendered
//! into the model prompt.
//!
//! Saves replace the file atomically, so a crash never leaves a torn file.
//! Concurrent writers are not serialized: two processes saving at once is
//! last-write-wins.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// One remembered translation from English query to shell command.
///
/// Serialized as a two-element array so the store file stays a plain list
/// of pairs, editable by hand.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Example {
    pub query: String,
    pub command: String,
}

impl Example {
    pub fn new(query: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            command: command.into(),
        }
    }
}

impl From<(String, String)> for Example {
    fn from((query, command): (String, String)) -> Self {
        Self { query, command }
    }
}

impl From<Example> for (String, String) {
    fn from(example: Example) -> Self {
        (example.query, example.command)
    }
}

/// Handle on the example store file
#[derive(Debug, Clone)]
pub struct ExampleStore {
    path: PathBuf,
}

impl ExampleStore {
    /// Bind the store to a file, creating an empty one on first run.
    ///
    /// Bootstrapping happens only here. Once bound, a file that is missing
    /// or unparseable at read time is an error, never an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create store directory: {}", parent.display())
                })?;
            }
            write_examples(path, &[])?;
            info!(path = %path.display(), "created new example store");
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored example.
    pub fn load(&self) -> Result<Vec<Example>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read example store: {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse example store JSON: {}", self.path.display()))
    }

    /// Rewrite the store: deduplicate, sort by (query, command), replace
    /// the file atomically via a sibling temp file and rename.
    pub fn save(&self, examples: Vec<Example>) -> Result<()> {
        let deduped: BTreeSet<Example> = examples.into_iter().collect();
        let sorted: Vec<Example> = deduped.into_iter().collect();
        write_examples(&self.path, &sorted)
    }

    /// Command of the first stored example whose query matches exactly.
    ///
    /// Case-sensitive. A miss is `None`, not an error.
    pub fn lookup(&self, query: &str) -> Result<Option<String>> {
        let examples = self.load()?;
        Ok(examples
            .into_iter()
            .find(|e| e.query == query)
            .map(|e| e.command))
    }

    /// Load fresh, add one example, and persist.
    pub fn append(&self, example: Example) -> Result<()> {
        let mut examples = self.load()?;
        examples.push(example);
        self.save(examples)
    }
}

fn write_examples(path: &Path, examples: &[Example]) -> Result<()> {
    let mut content = serde_json::to_string_pretty(examples)
        .context("Failed to serialize example store")?;
    content.push('\n');

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write example store: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace example store: {}", path.display()))
}

/// Default store location under the user data directory
pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("incant")
        .join("examples.json")
}
