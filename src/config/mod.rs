// ABOUTME: Application configuration for quoteflow
// Loaded from ~/.quoteflow/config.toml; every field has a default so a
// missing or partial file still yields a working app

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// How to handle an existing draft at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestorePolicy {
    /// Restore silently without asking
    Auto,
    /// Ask the user restore-vs-discard
    #[default]
    Prompt,
    /// Ignore drafts (they stay on disk until saved over or reset)
    Never,
}

/// AI assist backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Completion endpoint the extraction prompt is posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name sent in the request body
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API credential. The credential
    /// itself never lives in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Hard timeout for the parse call, in seconds
    #[serde(default = "default_assist_timeout")]
    pub timeout_secs: u64,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_assist_timeout(),
        }
    }
}

/// Autosave behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Idle window before an autosave fires, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms() }
    }
}

/// Draft persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftsConfig {
    /// Override for the storage file location
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// What to do with an existing draft at startup
    #[serde(default)]
    pub restore: RestorePolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub assist: AssistConfig,

    #[serde(default)]
    pub autosave: AutosaveConfig,

    #[serde(default)]
    pub drafts: DraftsConfig,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_assist_timeout() -> u64 {
    10
}

fn default_debounce_ms() -> u64 {
    2000
}

impl AppConfig {
    /// Base quoteflow directory under the user's home.
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".quoteflow"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Load config from disk. A missing file yields defaults; a file that
    /// exists but cannot be parsed is an error worth surfacing.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Ok(config)
    }

    /// Where the draft store lives, honoring the config override.
    pub fn draft_storage_path(&self) -> Result<PathBuf> {
        match &self.drafts.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::base_dir()?.join("drafts.json")),
        }
    }
}
