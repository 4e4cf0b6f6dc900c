//! End-to-end tests: ApiClient over HttpTransport against wiremock

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use courier::{
    ApiClient, ClientError, CodecConfig, Empty, EndpointDescriptor, HttpMethod, HttpTransport,
    KeyStrategy, NetworkError,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: String,
    display_name: String,
}

#[derive(Serialize)]
struct Search {
    query: String,
    page: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Event {
    name: String,
    #[serde(with = "courier_core::serde::date")]
    starts_at: DateTime<Utc>,
}

fn client() -> ApiClient {
    ApiClient::new(Arc::new(HttpTransport::new().expect("Failed to create transport")))
}

fn endpoint(server: &MockServer, route: &str) -> EndpointDescriptor {
    EndpointDescriptor::builder()
        .base_url(server.uri())
        .version("v1")
        .path(route)
        .header("x-api-key", "test-key")
        .build()
        .expect("valid endpoint")
}

#[tokio::test]
async fn test_get_with_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(query_param("query", "ada"))
        .and(query_param("page", "2"))
        .and(header("x-api-key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "42", "displayName": "Ada"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let user: User = client()
        .request_once(
            &endpoint(&mock_server, "users"),
            Some(&Search {
                query: "ada".into(),
                page: 2,
            }),
            HttpMethod::Get,
        )
        .await
        .expect("Request failed");

    assert_eq!(
        user,
        User {
            id: "42".into(),
            display_name: "Ada".into()
        }
    );
    mock_server.verify().await;
}

#[tokio::test]
async fn test_post_with_json_body_and_dates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/events"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "name": "launch",
            "starts_at": "2024-05-01T09:00:00.000+0000",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "launch",
            "startsAt": "2024-05-01T09:00:00.000+0000",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let event = Event {
        name: "launch".into(),
        starts_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    };
    let created: Event = client()
        .request_once(&endpoint(&mock_server, "events"), Some(&event), HttpMethod::Post)
        .await
        .expect("Request failed");

    assert_eq!(created, event);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_verbatim_keys_and_custom_date_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/events/1"))
        .and(body_json(json!({"name": "retro", "starts_at": "2024-05-01 17:30:00"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "retro",
            "starts_at": "2024-05-01 18:00:00",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::builder(Arc::new(HttpTransport::new().unwrap()))
        .codec_config(
            CodecConfig::default()
                .key_strategy(KeyStrategy::Verbatim)
                .date_format("%Y-%m-%d %H:%M:%S"),
        )
        .build();

    let event = Event {
        name: "retro".into(),
        starts_at: Utc.with_ymd_and_hms(2024, 5, 1, 17, 30, 0).unwrap(),
    };
    let updated: Event = client
        .request_once(&endpoint(&mock_server, "events/1"), Some(&event), HttpMethod::Put)
        .await
        .expect("Request failed");

    assert_eq!(updated.starts_at, Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap());
    mock_server.verify().await;
}

#[tokio::test]
async fn test_not_found_is_network_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = client()
        .request_once::<_, Empty, User>(&endpoint(&mock_server, "users/0"), None, HttpMethod::Get)
        .await
        .unwrap_err();
    assert!(matches!(err.network_error(), Some(NetworkError::NotFound)));
}

#[tokio::test]
async fn test_server_error_body_is_diagnostic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
        .mount(&mock_server)
        .await;

    let err = client()
        .request_once::<_, Empty, User>(&endpoint(&mock_server, "users/1"), None, HttpMethod::Get)
        .await
        .unwrap_err();
    assert_eq!(err.network_error().and_then(NetworkError::status_code), Some(503));
    assert_eq!(err.diagnostic_message(), Some("maintenance window"));
}

#[tokio::test]
async fn test_unwrapped_envelope_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"id": "42", "display_name": "Ada"},
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client();
    let endpoint = endpoint(&mock_server, "users/42");

    let user: User = client
        .request_unwrapped(&endpoint, None::<&Empty>, HttpMethod::Get)
        .await
        .expect("Request failed");
    assert_eq!(user.id, "42");

    let streamed = client
        .request_unwrapped_stream::<_, Empty, User>(&endpoint, None, HttpMethod::Get)
        .next()
        .await
        .expect("one item")
        .expect("Request failed");
    assert_eq!(streamed.display_name, "Ada");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_unwrapped_envelope_rejects_server_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/42"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "success",
            "data": {"id": "42", "display_name": "Ada"},
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client()
        .request_unwrapped::<_, Empty, User>(
            &endpoint(&mock_server, "users/42"),
            None,
            HttpMethod::Get,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::InvalidResponse {
            title: None,
            message: None
        }
    ));
    mock_server.verify().await;
}
