pub mod schema;

pub use schema::ToolsConfig;

use crate::types::ToolError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default home directory (~/.guide-tools).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".guide-tools"))
        .unwrap_or_else(|| PathBuf::from(".guide-tools"))
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<ToolsConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read guide-tools config file")?;
        let config: ToolsConfig =
            toml::from_str(&contents).context("Failed to parse guide-tools config (TOML)")?;
        Ok(config)
    } else {
        Ok(ToolsConfig::default())
    }
}

/// Save config to the given path (TOML format).
pub fn save_config(config: &ToolsConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents).context("Failed to write config file")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// API key access
// ---------------------------------------------------------------------------

/// Where the weather API key comes from.
///
/// `Env` is re-read on every call, so a key exported after startup is seen by
/// the next request. `Static` is a value the host resolved once and injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Env(String),
    Static(Option<String>),
}

impl KeySource {
    /// Resolve the key, failing with `MissingConfiguration` when absent or blank.
    pub fn resolve(&self) -> Result<String, ToolError> {
        let value = match self {
            Self::Env(var) => std::env::var(var).ok(),
            Self::Static(value) => value.clone(),
        };

        match value {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ToolError::missing_configuration(self.missing_message())),
        }
    }

    /// Whether a key is currently available, without exposing it.
    pub fn is_present(&self) -> bool {
        self.resolve().is_ok()
    }

    fn missing_message(&self) -> String {
        match self {
            Self::Env(var) => format!(
                "{} is not set. Export it in the agent's environment and retry.",
                var
            ),
            Self::Static(_) => "Weather API key is not configured.".into(),
        }
    }
}

impl From<&ToolsConfig> for KeySource {
    fn from(config: &ToolsConfig) -> Self {
        Self::Env(config.api_key_env.clone())
    }
}
