//! `get_current_weather`: validate, resolve the API key, fetch, normalize.

use super::traits::{ParamSpec, ParamType, Tool, ToolDescriptor};
use super::validate;
use crate::config::{KeySource, ToolsConfig};
use crate::openweather::{normalize, WeatherClient};
use crate::types::{into_payload, JsonMap, ToolError, Units};
use anyhow::Result;
use async_trait::async_trait;

pub const NAME: &str = "get_current_weather";

pub struct WeatherTool {
    client: WeatherClient,
    key: KeySource,
    default_units: Units,
}

impl WeatherTool {
    pub fn new(client: WeatherClient, key: KeySource, default_units: Units) -> Self {
        Self {
            client,
            key,
            default_units,
        }
    }

    /// Build from config; the API key is read from `config.api_key_env` per call.
    pub fn from_config(config: &ToolsConfig) -> Result<Self> {
        let client = WeatherClient::new(&config.weather_api_url, config.weather_timeout())?;
        Ok(Self::new(client, KeySource::from(config), config.default_units))
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: NAME.into(),
            description: "Get current weather for a city using the OpenWeather API. Returns \
                          conditions, temperature, feels-like temperature, humidity and wind, \
                          or an \"error\" field if the request fails or is misconfigured."
                .into(),
            parameters: vec![
                ParamSpec::required("city", ParamType::String, "City name (e.g. \"Colombo\")"),
                ParamSpec::optional(
                    "country_code",
                    ParamType::String,
                    "Optional ISO 3166 country code (e.g. \"LK\")",
                ),
                ParamSpec::optional("units", ParamType::String, "\"metric\" or \"imperial\"")
                    .with_default(self.default_units.as_str())
                    .one_of(&["metric", "imperial"]),
            ],
        }
    }

    async fn execute(&self, args: &JsonMap) -> Result<JsonMap, ToolError> {
        let api_key = self.key.resolve()?;
        let query = validate::weather_query(args, self.default_units)?;
        let payload = self.client.current_conditions(&query, &api_key).await?;
        into_payload(&normalize(&payload, &query))
    }
}
