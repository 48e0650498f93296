use guide_tools::config::{KeySource, ToolsConfig};
use guide_tools::openweather::client::DEFAULT_TIMEOUT;
use guide_tools::openweather::WeatherClient;
use guide_tools::tools::{TimeTool, ToolRegistry, WeatherTool};
use guide_tools::types::{ToolErrorKind, ToolRequest, Units};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry(server: &MockServer, key: Option<&str>) -> ToolRegistry {
    let client = WeatherClient::new(&server.uri(), DEFAULT_TIMEOUT).unwrap();
    let mut registry = ToolRegistry::new();
    registry.register(WeatherTool::new(
        client,
        KeySource::Static(key.map(Into::into)),
        Units::Metric,
    ));
    registry.register(TimeTool::new("Asia/Colombo"));
    registry
}

#[tokio::test]
async fn weather_dispatch_normalizes_provider_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Colombo"))
        .and(query_param("appid", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Colombo",
            "main": {"temp": 30, "humidity": 70},
            "weather": [{"main": "Clear", "description": "clear sky"}],
            "wind": {"speed": 3.1},
            "sys": {"country": "LK"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry(&server, Some("secret"))
        .dispatch(&ToolRequest::from_json(
            "get_current_weather",
            json!({"city": "Colombo", "units": "metric"}),
        ))
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "city": "Colombo",
            "country": "LK",
            "conditions": "Clear",
            "description": "clear sky",
            "temperature": {"value": 30, "unit": "C"},
            "feels_like": {"value": null, "unit": "C"},
            "humidity_percent": 70,
            "wind": {"speed": 3.1, "unit": "m/s"}
        })
    );
}

#[tokio::test]
async fn missing_key_is_structured_and_offline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = registry(&server, None)
        .dispatch(&ToolRequest::from_json(
            "get_current_weather",
            json!({"city": "Colombo"}),
        ))
        .await;

    assert_eq!(result.error_kind(), Some(ToolErrorKind::MissingConfiguration));
    let value = result.to_value();
    assert_eq!(value["kind"], "missing_configuration");
    assert!(value["error"].is_string());
}

#[tokio::test]
async fn invalid_timezone_echoes_input() {
    let server = MockServer::start().await;
    let result = registry(&server, None)
        .dispatch(&ToolRequest::from_json(
            "get_current_time",
            json!({"timezone": "Not/AZone"}),
        ))
        .await;

    let value = result.to_value();
    assert_eq!(value["kind"], "invalid_timezone");
    assert_eq!(value["timezone"], "Not/AZone");
}

#[tokio::test]
async fn concurrent_weather_and_time_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    let registry = registry(&server, Some("k"));

    let weather = ToolRequest::from_json("get_current_weather", json!({"city": "Galle"}));
    let time = ToolRequest::from_json("get_current_time", json!({"timezone": "UTC"}));
    let (weather_result, time_result) =
        tokio::join!(registry.dispatch(&weather), registry.dispatch(&time));

    let weather_value = weather_result.to_value();
    assert_eq!(weather_value["kind"], "upstream_http_error");
    assert_eq!(weather_value["status"], 503);
    assert_eq!(weather_value["details"], "maintenance");

    assert!(time_result.is_ok());
    assert_eq!(time_result.to_value()["utc_offset"], "+0000");
}

#[tokio::test]
async fn default_registry_exposes_two_tools() {
    let registry = ToolRegistry::with_defaults(&ToolsConfig::default()).unwrap();
    let functions: Vec<_> = registry
        .descriptors()
        .iter()
        .map(|d| d.to_function_json())
        .collect();

    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0]["name"], "get_current_weather");
    assert_eq!(functions[1]["name"], "get_current_time");
    assert_eq!(
        functions[1]["parameters"]["properties"]["timezone"]["default"],
        "Asia/Colombo"
    );

    let result = registry
        .dispatch(&ToolRequest::from_json("google_search", json!({"q": "Sigiriya"})))
        .await;
    assert_eq!(result.error_kind(), Some(ToolErrorKind::UnknownTool));
}
