//! HTTP transport client implementation
//!
//! Implements [`TransportService`] on top of `reqwest`. Each call is a single
//! attempt; nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use courier_core::RequestDescriptor;
use http::header::CONTENT_TYPE;
use reqwest::Client as ReqwestClient;

use super::encoding::query_pairs;
use crate::error::{NetworkError, Result};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata};
use crate::traits::{RawResponse, StatusMetadata, TransportService};

/// HTTP transport implementation
///
/// Parameters of safe methods (GET, HEAD, OPTIONS) are sent as a query
/// string; every other method sends them as a JSON body. The per-request
/// timeout comes from the [`RequestDescriptor`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: ReqwestClient,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent)
            .build()
            .map_err(NetworkError::generic)?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: ReqwestClient) -> Self {
        Self { client }
    }

    /// Build the reqwest request, returning the encoded body size if any.
    fn build(&self, request: &RequestDescriptor) -> Result<(reqwest::RequestBuilder, Option<usize>)> {
        let mut req = self
            .client
            .request(request.method.into(), request.url.clone())
            .timeout(request.timeout);

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let mut body_size = None;
        if let Some(params) = &request.parameters {
            if request.method.is_safe() {
                req = req.query(&query_pairs(params));
            } else {
                let body = serde_json::to_vec(params).map_err(NetworkError::generic)?;
                body_size = Some(body.len());
                req = req.header(CONTENT_TYPE, "application/json").body(body);
            }
        }

        Ok((req, body_size))
    }
}

#[async_trait]
impl TransportService for HttpTransport {
    async fn execute(&self, request: RequestDescriptor) -> Result<RawResponse> {
        let (req, body_size) = self.build(&request)?;
        let mut metadata = RequestMetadata::from_request(&request);
        if let Some(size) = body_size {
            metadata = metadata.with_body_size(size);
        }
        let timer = RequestTimer::start();
        metadata.log_request();

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = classify(e);
                ResponseMetadata::new(None, timer.elapsed()).log_error(&metadata, &err);
                return Err(err);
            }
        };

        let code = response.status().as_u16();
        let mut status = StatusMetadata::new(code);

        // Collect headers
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                status.headers.push((key.to_string(), v.to_string()));
            }
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let err = classify(e);
                ResponseMetadata::new(Some(code), timer.elapsed()).log_error(&metadata, &err);
                return Err(err);
            }
        };
        let outcome = ResponseMetadata::new(Some(code), timer.elapsed()).with_body_size(body.len());

        if !status.is_success() {
            let err = if code == 404 {
                NetworkError::NotFound
            } else {
                NetworkError::ServerError {
                    body: Some(body).filter(|b| !b.is_empty()),
                    status_code: code,
                }
            };
            outcome.log_error(&metadata, &err);
            return Err(err);
        }

        outcome.log_success(&metadata);
        Ok(RawResponse::new(request, status, Some(body)))
    }
}

fn classify(err: reqwest::Error) -> NetworkError {
    if err.is_builder() {
        NetworkError::UrlGeneration
    } else if err.is_connect() {
        NetworkError::NotConnected
    } else {
        NetworkError::generic(err)
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
            user_agent: concat!("courier/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{HttpMethod, Payload};
    use url::Url;

    #[test]
    fn test_http_transport_creation() {
        let transport = HttpTransport::new().expect("Failed to create transport");
        assert!(matches!(transport, HttpTransport { .. }));
    }

    #[test]
    fn test_http_transport_with_config() {
        let config = HttpTransportConfig {
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 5,
            user_agent: "courier-test".to_string(),
        };
        assert!(HttpTransport::with_config(config).is_ok());
    }

    fn request(method: HttpMethod) -> RequestDescriptor {
        let mut params = Payload::new();
        params.insert("name".into(), serde_json::json!("Ada"));
        RequestDescriptor::new(method, Url::parse("https://api.example.com/v1/users").unwrap())
            .with_parameters(Some(params))
    }

    #[test]
    fn test_build_reports_json_body_size() {
        let transport = HttpTransport::new().unwrap();
        let (_, body_size) = transport.build(&request(HttpMethod::Post)).unwrap();
        assert_eq!(body_size, Some(br#"{"name":"Ada"}"#.len()));
    }

    #[test]
    fn test_build_query_has_no_body_size() {
        let transport = HttpTransport::new().unwrap();
        let (builder, body_size) = transport.build(&request(HttpMethod::Get)).unwrap();
        assert_eq!(body_size, None);
        let built = builder.build().unwrap();
        assert_eq!(built.url().query(), Some("name=Ada"));
    }
}
