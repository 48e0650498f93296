//! Argument validation. Pure functions; nothing here touches the network.

use crate::types::{JsonMap, TimeQuery, ToolError, Units, WeatherQuery};
use serde_json::Value;

/// Read an optional string argument. Absent and `null` are both `None`.
fn optional_str<'a>(args: &'a JsonMap, key: &str) -> Result<Option<&'a str>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ToolError::invalid_arguments(format!(
            "'{}' must be a string, got {}",
            key,
            json_type(other)
        ))
        .with_detail("argument", key)),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate `get_current_weather` arguments.
pub fn weather_query(args: &JsonMap, default_units: Units) -> Result<WeatherQuery, ToolError> {
    let requested_city = optional_str(args, "city")?.unwrap_or_default();
    let city = Some(requested_city.trim())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            ToolError::invalid_arguments("'city' is required and must not be blank")
                .with_detail("argument", "city")
        })?;

    let country_code = optional_str(args, "country_code")?
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let units = match args.get("units") {
        None | Some(Value::Null) => default_units,
        Some(Value::String(raw)) => Units::parse(raw)
            .ok_or_else(|| ToolError::invalid_units().with_detail("units", raw.as_str()))?,
        Some(other) => return Err(ToolError::invalid_units().with_detail("units", other.clone())),
    };

    Ok(WeatherQuery {
        city: city.to_string(),
        requested_city: requested_city.to_string(),
        country_code,
        units,
    })
}

/// Validate `get_current_time` arguments. The identifier itself is checked
/// later against the timezone database.
pub fn time_query(args: &JsonMap, default_timezone: &str) -> Result<TimeQuery, ToolError> {
    let timezone = optional_str(args, "timezone")?.unwrap_or(default_timezone);
    Ok(TimeQuery {
        timezone: timezone.to_string(),
    })
}
