//! `get_current_time`: current wall-clock time in an IANA timezone.

use super::traits::{ParamSpec, ParamType, Tool, ToolDescriptor};
use super::validate;
use crate::config::ToolsConfig;
use crate::types::{into_payload, JsonMap, TimeReading, ToolError};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

pub const NAME: &str = "get_current_time";

/// Resolve `timezone` and express `now` in it.
pub fn resolve_time(timezone: &str, now: DateTime<Utc>) -> Result<TimeReading, ToolError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| ToolError::invalid_timezone(timezone))?;
    let local = now.with_timezone(&tz);

    Ok(TimeReading {
        timezone: timezone.to_string(),
        iso_timestamp: local.to_rfc3339_opts(SecondsFormat::Micros, false),
        date: local.format("%Y-%m-%d").to_string(),
        time: local.format("%H:%M:%S").to_string(),
        utc_offset: local.format("%z").to_string(),
    })
}

pub struct TimeTool {
    default_timezone: String,
}

impl TimeTool {
    pub fn new(default_timezone: impl Into<String>) -> Self {
        Self {
            default_timezone: default_timezone.into(),
        }
    }

    pub fn from_config(config: &ToolsConfig) -> Self {
        Self::new(config.default_timezone.clone())
    }
}

impl Default for TimeTool {
    fn default() -> Self {
        Self::new("Asia/Colombo")
    }
}

#[async_trait]
impl Tool for TimeTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: NAME.into(),
            description: "Get the current local time for a given IANA timezone. Returns the \
                          timezone and current time in ISO format, or an \"error\" field if the \
                          timezone is invalid."
                .into(),
            parameters: vec![ParamSpec::optional(
                "timezone",
                ParamType::String,
                "IANA timezone string (e.g. \"Asia/Colombo\", \"UTC\")",
            )
            .with_default(self.default_timezone.as_str())],
        }
    }

    async fn execute(&self, args: &JsonMap) -> Result<JsonMap, ToolError> {
        let query = validate::time_query(args, &self.default_timezone)?;
        into_payload(&resolve_time(&query.timezone, Utc::now())?)
    }
}
