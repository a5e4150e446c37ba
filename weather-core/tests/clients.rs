//! Upstream client behaviour against a mock HTTP server.

use std::time::Duration;

use reqwest::StatusCode;
use weather_core::client::{GeocodingClient, OpenMeteoClient, http_client};
use weather_core::{ClientError, Geocoder, TemperatureSource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoder(server: &MockServer) -> GeocodingClient {
    let http = http_client(Duration::from_secs(5)).unwrap();
    GeocodingClient::new(http, format!("{}/v1/search", server.uri()), "ru")
}

fn forecast(server: &MockServer) -> OpenMeteoClient {
    let http = http_client(Duration::from_secs(5)).unwrap();
    OpenMeteoClient::new(http, format!("{}/v1/forecast", server.uri()))
}

#[tokio::test]
async fn geocoding_sends_expected_query_and_takes_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "moscow"))
        .and(query_param("count", "1"))
        .and(query_param("language", "ru"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "name": "Москва", "country": "Россия", "latitude": 55.75, "longitude": 37.62 },
                { "name": "Moscow", "country": "США", "latitude": 46.73, "longitude": -117.0 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let coordinate = geocoder(&server).resolve("moscow").await.unwrap();

    assert_eq!(coordinate.latitude, 55.75);
    assert_eq!(coordinate.longitude, 37.62);
}

#[tokio::test]
async fn geocoding_empty_results_is_distinct_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .mount(&server)
        .await;

    let err = geocoder(&server).resolve("atlantis").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyResult { ref query, .. } if query == "atlantis"));
}

#[tokio::test]
async fn geocoding_missing_results_field_is_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "generationtime_ms": 0.4 })),
        )
        .mount(&server)
        .await;

    let err = geocoder(&server).resolve("atlantis").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyResult { .. }));
}

#[tokio::test]
async fn geocoding_bad_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = geocoder(&server).resolve("moscow").await.unwrap_err();
    match err {
        ClientError::BadStatus { status, body, .. } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected BadStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn geocoding_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "name": "Москва", "latitude": "north" }]
        })))
        .mount(&server)
        .await;

    let err = geocoder(&server).resolve("moscow").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn slow_upstream_times_out_as_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "results": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let http = http_client(Duration::from_millis(200)).unwrap();
    let client = GeocodingClient::new(http, format!("{}/v1/search", server.uri()), "ru");

    let err = client.resolve("moscow").await.unwrap_err();
    match err {
        ClientError::Network { source, .. } => assert!(source.is_timeout()),
        other => panic!("expected Network, got {other:?}"),
    }
}

#[tokio::test]
async fn forecast_sends_coordinates_and_returns_raw_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "55.75"))
        .and(query_param("longitude", "37.62"))
        .and(query_param("current", "temperature_2m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 55.75,
            "longitude": 37.625,
            "current_units": { "time": "iso8601", "temperature_2m": "°C" },
            "current": { "time": "2024-01-01T12:00", "interval": 900, "temperature_2m": -5.3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let current = forecast(&server).current_temperature(55.75, 37.62).await.unwrap();

    assert_eq!(current.observed_at, "2024-01-01T12:00");
    assert_eq!(current.temperature_celsius, -5.3);
}

#[tokio::test]
async fn forecast_missing_current_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": { "time": "2024-01-01T12:00" }
        })))
        .mount(&server)
        .await;

    let err = forecast(&server).current_temperature(0.0, 0.0).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn forecast_bad_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })))
        .mount(&server)
        .await;

    let err = forecast(&server).current_temperature(200.0, 0.0).await.unwrap_err();
    assert!(matches!(err, ClientError::BadStatus { status, .. } if status == StatusCode::BAD_REQUEST));
}
