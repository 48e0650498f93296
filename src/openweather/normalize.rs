//! Mapping from the provider's current-conditions payload to [`WeatherReading`].
//!
//! Every nested object may be missing or of the wrong type. Lookups degrade to
//! `None` instead of failing, so the mapping is total over any JSON value.

use crate::types::{Measurement, WeatherQuery, WeatherReading, Wind};
use serde_json::{Map, Value};

/// The subset of the provider payload this crate reads, all optional.
///
/// Leaves keep the provider's value as sent; only absent or `null` fields
/// become `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderReport {
    pub name: Option<String>,
    pub country: Option<String>,
    pub conditions: Option<Value>,
    pub description: Option<Value>,
    pub temp: Option<Value>,
    pub feels_like: Option<Value>,
    pub humidity: Option<Value>,
    pub wind_speed: Option<Value>,
}

impl ProviderReport {
    pub fn from_value(payload: &Value) -> Self {
        let root = as_object(Some(payload));
        let weather = as_object(
            root.and_then(|r| r.get("weather"))
                .and_then(Value::as_array)
                .and_then(|list| list.first()),
        );
        let main = as_object(root.and_then(|r| r.get("main")));
        let wind = as_object(root.and_then(|r| r.get("wind")));
        let sys = as_object(root.and_then(|r| r.get("sys")));

        Self {
            name: text(root, "name"),
            country: text(sys, "country"),
            conditions: leaf(weather, "main"),
            description: leaf(weather, "description"),
            temp: leaf(main, "temp"),
            feels_like: leaf(main, "feels_like"),
            humidity: leaf(main, "humidity"),
            wind_speed: leaf(wind, "speed"),
        }
    }
}

fn as_object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

fn leaf(obj: Option<&Map<String, Value>>, key: &str) -> Option<Value> {
    obj.and_then(|o| o.get(key))
        .filter(|v| !v.is_null())
        .cloned()
}

fn text(obj: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Build the normalized reading for `query` from a raw provider payload.
///
/// `city` falls back to the caller's string as sent, `country` to the caller's
/// country code.
pub fn normalize(payload: &Value, query: &WeatherQuery) -> WeatherReading {
    let report = ProviderReport::from_value(payload);
    let temp_unit = query.units.temperature_label();

    WeatherReading {
        city: report
            .name
            .unwrap_or_else(|| query.requested_city.clone()),
        country: report.country.or_else(|| query.country_code.clone()),
        conditions: report.conditions,
        description: report.description,
        temperature: Measurement {
            value: report.temp,
            unit: temp_unit,
        },
        feels_like: Measurement {
            value: report.feels_like,
            unit: temp_unit,
        },
        humidity_percent: report.humidity,
        wind: Wind {
            speed: report.wind_speed,
            unit: query.units.wind_label(),
        },
    }
}
