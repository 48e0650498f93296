//! Configuration schema for `config.toml`.

use crate::types::Units;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Weather provider base URL (the `/data/2.5/weather` path is appended).
    pub weather_api_url: String,

    /// Hard timeout for one weather request, in seconds.
    pub weather_timeout_secs: u64,

    /// Environment variable holding the weather provider API key.
    pub api_key_env: String,

    /// Units used when a weather call omits `units`.
    pub default_units: Units,

    /// Timezone used when a time call omits `timezone`.
    pub default_timezone: String,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            weather_api_url: "https://api.openweathermap.org".into(),
            weather_timeout_secs: 10,
            api_key_env: "OPENWEATHER_API_KEY".into(),
            default_units: Units::Metric,
            default_timezone: "Asia/Colombo".into(),
            log_level: "info".into(),
        }
    }
}

impl ToolsConfig {
    /// Resolve a path that may contain `~` to an absolute path.
    pub fn resolve_path(path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }

    pub fn weather_timeout(&self) -> Duration {
        Duration::from_secs(self.weather_timeout_secs)
    }
}
