//! OpenWeather current-conditions client.
//!
//! One attempt per call, bounded by the client timeout. The raw JSON payload is
//! returned untouched; interpretation lives in [`super::normalize`].

use crate::types::{ToolError, ToolErrorKind, WeatherQuery};
use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Upstream default timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const FAILURE_MESSAGE: &str = "OpenWeather request failed";

/// Closed set of ways a weather fetch can fail.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl From<FetchError> for ToolError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status { status, body } => {
                ToolError::new(ToolErrorKind::UpstreamHttpError, FAILURE_MESSAGE)
                    .with_detail("status", status)
                    .with_detail("details", body)
            }
            FetchError::Timeout(_) | FetchError::Network(_) => {
                ToolError::new(ToolErrorKind::TransportError, FAILURE_MESSAGE)
                    .with_detail("details", err.to_string())
            }
            FetchError::Decode(_) | FetchError::Other(_) => {
                ToolError::new(ToolErrorKind::UnexpectedError, FAILURE_MESSAGE)
                    .with_detail("details", err.to_string())
            }
        }
    }
}

/// Classify a send failure. The URL is stripped first: it carries `appid`.
fn classify_send_error(err: reqwest::Error) -> FetchError {
    let err = err.without_url();
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else if err.is_connect() || err.is_request() {
        FetchError::Network(err.to_string())
    } else {
        FetchError::Other(err.to_string())
    }
}

/// Weather provider client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    http: reqwest::Client,
}

impl WeatherClient {
    /// Create a client with a hard per-request timeout and no idle connection reuse.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .context("Failed to build weather HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CURRENT_WEATHER_PATH)
    }

    /// Fetch current conditions for `query`, returning the decoded JSON body.
    pub async fn current_conditions(
        &self,
        query: &WeatherQuery,
        api_key: &str,
    ) -> Result<Value, FetchError> {
        let location = query.location();
        debug!("OpenWeather request: q={} units={}", location, query.units);

        let resp = self
            .http
            .get(self.endpoint())
            .header(ACCEPT, "application/json")
            .query(&[
                ("q", location.as_str()),
                ("appid", api_key),
                ("units", query.units.as_str()),
            ])
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| describe_status(status));
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| {
            let e = e.without_url();
            if e.is_timeout() {
                FetchError::Timeout(e.to_string())
            } else {
                FetchError::Decode(e.to_string())
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn describe_status(status: StatusCode) -> String {
    format!(
        "HTTP Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}
