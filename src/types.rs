//! Shared types crossing the tool boundary.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// JSON object used for tool arguments, payloads, and error details.
pub type JsonMap = Map<String, Value>;

// ---------------------------------------------------------------------------
// Requests and results
// ---------------------------------------------------------------------------

/// A structured tool call produced by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: JsonMap,
}

impl ToolRequest {
    pub fn new(name: impl Into<String>, arguments: JsonMap) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Build a request from a `json!({...})` literal. Non-object values become
    /// an empty argument mapping.
    pub fn from_json(name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => JsonMap::new(),
        };
        Self::new(name, arguments)
    }
}

/// Outcome of a tool call. Both variants serialize to a plain JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Ok(JsonMap),
    Error(ToolError),
}

impl ToolResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Error kind, if this is a failure.
    pub fn error_kind(&self) -> Option<ToolErrorKind> {
        match self {
            Self::Ok(_) => None,
            Self::Error(e) => Some(e.kind),
        }
    }

    /// Render as the JSON object handed back to the orchestrator.
    ///
    /// Failures are flattened into `{"error": <message>, "kind": <kind>, ...details}`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Ok(payload) => Value::Object(payload.clone()),
            Self::Error(err) => {
                let mut out = JsonMap::new();
                out.insert("error".into(), Value::String(err.message.clone()));
                out.insert("kind".into(), Value::String(err.kind.to_string()));
                if let Some(details) = &err.details {
                    for (key, value) in details {
                        out.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                }
                Value::Object(out)
            }
        }
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl From<ToolError> for ToolResult {
    fn from(err: ToolError) -> Self {
        Self::Error(err)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Closed set of failure kinds a tool call can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    MissingConfiguration,
    InvalidArguments,
    InvalidUnits,
    InvalidTimezone,
    TransportError,
    UpstreamHttpError,
    UnexpectedError,
    UnknownTool,
}

impl fmt::Display for ToolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfiguration => write!(f, "missing_configuration"),
            Self::InvalidArguments => write!(f, "invalid_arguments"),
            Self::InvalidUnits => write!(f, "invalid_units"),
            Self::InvalidTimezone => write!(f, "invalid_timezone"),
            Self::TransportError => write!(f, "transport_error"),
            Self::UpstreamHttpError => write!(f, "upstream_http_error"),
            Self::UnexpectedError => write!(f, "unexpected_error"),
            Self::UnknownTool => write!(f, "unknown_tool"),
        }
    }
}

/// A structured tool failure: kind, human-readable message, optional details.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub details: Option<JsonMap>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one machine-readable detail field.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(JsonMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }

    pub fn missing_configuration(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::MissingConfiguration, message)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message)
    }

    pub fn invalid_units() -> Self {
        Self::new(
            ToolErrorKind::InvalidUnits,
            "Invalid units. Use 'metric' or 'imperial'.",
        )
    }

    /// Unknown timezone; echoes the identifier unchanged.
    pub fn invalid_timezone(timezone: &str) -> Self {
        Self::new(
            ToolErrorKind::InvalidTimezone,
            "Invalid timezone. Use an IANA timezone like 'Asia/Colombo' or 'UTC'.",
        )
        .with_detail("timezone", timezone)
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new(ToolErrorKind::UnknownTool, format!("Unknown tool: {}", name))
            .with_detail("tool", name)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::UnexpectedError, message)
    }
}

/// Serialize a typed reading into a JSON object payload.
pub fn into_payload<T: Serialize>(value: &T) -> Result<JsonMap, ToolError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ToolError::unexpected(format!(
            "tool payload is not a JSON object: {}",
            other
        ))),
        Err(e) => Err(ToolError::unexpected(format!(
            "failed to serialize tool payload: {}",
            e
        ))),
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Measurement system requested from the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    /// Case-sensitive parse of `"metric"` / `"imperial"`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "metric" => Some(Self::Metric),
            "imperial" => Some(Self::Imperial),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Self::Metric => "C",
            Self::Imperial => "F",
        }
    }

    pub fn wind_label(&self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::Metric
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated weather lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    /// Trimmed, non-empty.
    pub city: String,
    /// City exactly as the caller sent it; echoed when the provider omits a name.
    pub requested_city: String,
    /// Trimmed, non-empty when present. Not checked against ISO-3166.
    pub country_code: Option<String>,
    pub units: Units,
}

impl WeatherQuery {
    /// Provider `q` parameter: `city` or `city,country`.
    pub fn location(&self) -> String {
        match &self.country_code {
            Some(cc) => format!("{},{}", self.city, cc),
            None => self.city.clone(),
        }
    }
}

/// A value with its unit label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub value: Option<Value>,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wind {
    pub speed: Option<Value>,
    pub unit: &'static str,
}

/// Normalized current conditions.
///
/// Provider-sourced leaves hold whatever the provider sent, or `None` when the
/// field is absent or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    pub city: String,
    pub country: Option<String>,
    pub conditions: Option<Value>,
    pub description: Option<Value>,
    pub temperature: Measurement,
    pub feels_like: Measurement,
    pub humidity_percent: Option<Value>,
    pub wind: Wind,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeQuery {
    pub timezone: String,
}

/// Local wall-clock reading for one timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeReading {
    pub timezone: String,
    /// RFC 3339 timestamp with offset.
    #[serde(rename = "iso")]
    pub iso_timestamp: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`, 24-hour.
    pub time: String,
    /// `±HHMM`
    pub utc_offset: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_result_flattens_details() {
        let result = ToolResult::from(ToolError::invalid_timezone("Not/AZone"));
        let value = result.to_value();

        assert_eq!(value["kind"], "invalid_timezone");
        assert_eq!(value["timezone"], "Not/AZone");
        assert!(value["error"].as_str().unwrap().starts_with("Invalid timezone"));
    }

    #[test]
    fn details_never_override_error_fields() {
        let err = ToolError::unexpected("boom").with_detail("kind", "spoofed");
        let value = ToolResult::from(err).to_value();

        assert_eq!(value["kind"], "unexpected_error");
        assert_eq!(value["error"], "boom");
    }

    #[test]
    fn ok_result_serializes_as_payload() {
        let mut payload = JsonMap::new();
        payload.insert("city".into(), json!("Kandy"));
        let result = ToolResult::Ok(payload);

        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"city": "Kandy"}));
        assert!(result.is_ok());
        assert_eq!(result.error_kind(), None);
    }

    #[test]
    fn units_parse_is_case_sensitive() {
        assert_eq!(Units::parse("metric"), Some(Units::Metric));
        assert_eq!(Units::parse("imperial"), Some(Units::Imperial));
        assert_eq!(Units::parse("Metric"), None);
        assert_eq!(Units::parse("kelvin"), None);
    }

    #[test]
    fn location_appends_country_code() {
        let mut query = WeatherQuery {
            city: "Galle".into(),
            requested_city: " Galle".into(),
            country_code: None,
            units: Units::Metric,
        };
        assert_eq!(query.location(), "Galle");

        query.country_code = Some("LK".into());
        assert_eq!(query.location(), "Galle,LK");
    }

    #[test]
    fn request_from_non_object_has_empty_arguments() {
        let request = ToolRequest::from_json("get_current_time", json!("UTC"));
        assert!(request.arguments.is_empty());
    }
}
