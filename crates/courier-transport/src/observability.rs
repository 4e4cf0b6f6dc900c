//! Structured logging for request pipelines
//!
//! Both the HTTP transport and the API client log through these helpers so
//! every event for one request carries the same `request_id`, `method` and
//! `url` fields. Payloads are never logged, only their sizes.

use std::time::{Duration, Instant};

use courier_core::RequestDescriptor;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Correlation id of the request
    pub id: Uuid,
    /// HTTP method (GET, POST, etc.)
    pub method: &'static str,
    /// Request URL
    pub url: String,
    /// Encoded body or query size in bytes (optional)
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Capture the loggable parts of a request
    pub fn from_request(request: &RequestDescriptor) -> Self {
        Self {
            id: request.id,
            method: request.method.as_str(),
            url: request.url.to_string(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            request_id = %self.id,
            method = self.method,
            url = %self.url,
            body_size = self.body_size,
            "Sending HTTP request"
        );
    }

    /// Log a pipeline step for this request
    pub fn log_step(&self, step: &str) {
        debug!(
            request_id = %self.id,
            method = self.method,
            url = %self.url,
            step = step,
            "Pipeline step"
        );
    }
}

/// Response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code, if the exchange got that far
    pub status: Option<u16>,
    /// Response body size in bytes (optional)
    pub body_size: Option<usize>,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: Option<u16>, elapsed: Duration) -> Self {
        Self {
            status,
            body_size: None,
            elapsed,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log successful response
    pub fn log_success(&self, request: &RequestMetadata) {
        info!(
            request_id = %request.id,
            method = request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            "HTTP request succeeded"
        );
    }

    /// Log failed response
    pub fn log_error(&self, request: &RequestMetadata, error: &dyn std::error::Error) {
        warn!(
            request_id = %request.id,
            method = request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            error = %error,
            "HTTP request failed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Lifecycle logging for a one-shot response stream
#[derive(Debug)]
pub struct StreamContext {
    request_id: Option<Uuid>,
    timer: Instant,
}

impl StreamContext {
    /// Start tracking a stream. Fixture streams have no request id.
    pub fn new(request_id: Option<Uuid>) -> Self {
        Self {
            request_id,
            timer: Instant::now(),
        }
    }

    /// Log stream started
    pub fn log_started(&self) {
        debug!(request_id = ?self.request_id, "Opening response stream");
    }

    /// Log the single value being delivered
    pub fn log_delivered(&self, ok: bool) {
        debug!(
            request_id = ?self.request_id,
            ok = ok,
            elapsed_ms = self.timer.elapsed().as_millis(),
            "Response stream delivered"
        );
    }

    /// Log stream cancelled before delivery
    pub fn log_cancelled(&self) {
        debug!(
            request_id = ?self.request_id,
            elapsed_ms = self.timer.elapsed().as_millis(),
            "Response stream cancelled"
        );
    }
}

/// Install an env-filtered fmt subscriber.
///
/// Honors `RUST_LOG`, falling back to `default_directive` (e.g.
/// `"courier=debug"`). Does nothing if a global subscriber is already set.
#[cfg(feature = "trace")]
pub fn init_tracing(default_directive: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
