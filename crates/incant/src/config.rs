//! Configuration loading for incant
//!
//! One TOML file with every field defaulted, so a missing file is a valid
//! configuration. Built once at startup and passed into the sources; the
//! only environment read is HUGGING_FACE_API_KEY, taken here so nothing
//! else touches the environment.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Incant configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Override for the example store file
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Request timeout for both answer services, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub community: CommunityConfig,

    #[serde(default)]
    pub model: ModelConfig,
}

/// Community answer service settings
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityConfig {
    #[serde(default = "default_community_endpoint")]
    pub endpoint: String,

    /// Domain tag prefixed to every search
    #[serde(default = "default_community_tag")]
    pub tag: String,

    /// Cleaned candidates required before the source answers
    #[serde(default = "default_min_candidates")]
    pub min_candidates: usize,
}

/// Model fallback settings
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,

    /// Sent verbatim as the Authorization header when present
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_community_endpoint() -> String {
    "https://www.codegrepper.com/api/get_answers_1.php".to_string()
}

fn default_community_tag() -> String {
    "bash".to_string()
}

fn default_min_candidates() -> usize {
    2
}

fn default_model_endpoint() -> String {
    "https://api-inference.huggingface.co/models/bigscience/bloom".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            timeout_secs: default_timeout_secs(),
            community: CommunityConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_community_endpoint(),
            tag: default_community_tag(),
            min_candidates: default_min_candidates(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_model_endpoint(),
            api_token: None,
        }
    }
}

impl Config {
    /// Load configuration from the user config file, then apply the
    /// environment token override
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(&Self::config_path())?;

        if let Ok(token) = env::var("HUGGING_FACE_API_KEY") {
            if !token.is_empty() {
                config.model.api_token = Some(token);
            }
        }

        Ok(config)
    }

    /// Parse a config file, or fall back to defaults when it is absent
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("incant")
            .join("config.toml")
    }
}
