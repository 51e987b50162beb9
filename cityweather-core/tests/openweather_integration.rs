//! Integration tests for OpenWeatherProvider using wiremock.
//!
//! These tests verify request shape, response parsing and error mapping
//! against a mock HTTP server.

use cityweather_core::{
    Applied, FailurePolicy, Units, WeatherError, WeatherProvider, WeatherSession, fetch_report,
    format_local_time, provider::openweather::OpenWeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "name": "London",
        "dt": 1690000000,
        "timezone": 3600,
        "main": { "temp": 18.46, "feels_like": 18.1, "humidity": 72 },
        "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }],
        "sys": { "country": "GB", "sunrise": 1689998000, "sunset": 1690055000 }
    })
}

fn forecast_body(entries: usize) -> serde_json::Value {
    let list: Vec<_> = (0..entries)
        .map(|i| {
            serde_json::json!({
                "dt": 1690005600 + (i as i64) * 10800,
                "main": { "temp": 10.0 + i as f64 },
                "weather": [{ "description": format!("slot {i}"), "icon": "04d" }]
            })
        })
        .collect();

    serde_json::json!({ "cod": "200", "cnt": entries, "list": list })
}

fn provider_for(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new("TEST_KEY".into(), Units::Metric).with_base_url(server.uri())
}

async fn mount_not_found(server: &MockServer, endpoint: &str) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_current_parses_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let snapshot = provider_for(&mock_server).current("London").await.unwrap();

    assert_eq!(snapshot.location_name, "London");
    assert_eq!(snapshot.country_code, "GB");
    assert_eq!(snapshot.condition_description, "light rain");
    assert_eq!(snapshot.icon_id, "10d");
    assert_eq!(snapshot.timezone_offset_seconds, 3600);
    assert_eq!(snapshot.sunrise_timestamp, 1689998000);
    assert!((snapshot.temperature - 18.46).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_fetch_report_samples_forty_entries_to_five_days() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(40)))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let report = fetch_report(&provider, "London").await.unwrap();

    let labels: Vec<_> = report
        .forecast
        .iter()
        .map(|d| d.condition_description.as_str())
        .collect();
    assert_eq!(labels, ["slot 0", "slot 8", "slot 16", "slot 24", "slot 32"]);

    let current = &report.current;
    assert_eq!(
        format_local_time(current.timestamp, current.timezone_offset_seconds).as_deref(),
        Some("05:26 AM")
    );
}

#[tokio::test]
async fn test_unknown_city_is_not_found_and_clears_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(40)))
        .mount(&mock_server)
        .await;
    mount_not_found(&mock_server, "/weather").await;
    mount_not_found(&mock_server, "/forecast").await;

    let provider = provider_for(&mock_server);
    let mut session = WeatherSession::new(FailurePolicy::Clear);

    let token = session.begin_request();
    let first = fetch_report(&provider, "London").await;
    assert!(matches!(session.apply(token, first), Applied::Updated));
    assert!(session.report().is_some());

    let token = session.begin_request();
    let second = fetch_report(&provider, "Nowhere123").await;
    match session.apply(token, second) {
        Applied::Failed(err) => {
            assert!(matches!(err, WeatherError::CityNotFound(ref c) if c == "Nowhere123"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(session.report().is_none(), "clear policy must drop the prior snapshot");
}

#[tokio::test]
async fn test_forecast_not_found_discards_successful_current() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&mock_server)
        .await;
    mount_not_found(&mock_server, "/forecast").await;

    let err = fetch_report(&provider_for(&mock_server), "London")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_invalid_key_is_rejected_with_api_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).current("London").await.unwrap_err();

    match err {
        WeatherError::Rejected { status, message } => {
            assert_eq!(status, 401);
            assert!(message.starts_with("Invalid API key"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"list\": 5}"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).forecast("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::MalformedResponse(ref m) if m.starts_with("forecast")));
}

#[tokio::test]
async fn test_empty_weather_list_is_malformed() {
    let mock_server = MockServer::start().await;

    let mut body = current_body();
    body["weather"] = serde_json::json!([]);

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).current("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let provider = OpenWeatherProvider::new("TEST_KEY".into(), Units::Metric)
        .with_base_url("http://127.0.0.1:9");

    let err = provider.current("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::Network(_)));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_imperial_units_are_requested() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::new("TEST_KEY".into(), Units::Imperial)
        .with_base_url(mock_server.uri());

    assert!(provider.current("London").await.is_ok());
}
