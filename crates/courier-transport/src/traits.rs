//! Transport trait and response model
//!
//! A transport performs one exchange for a [`RequestDescriptor`] and reports
//! the outcome. It is offered in two shapes: a future resolving once, and a
//! stream producing one outcome and then completing.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use courier_core::RequestDescriptor;
use futures::Stream;

use crate::error::Result;

/// Status line and headers of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMetadata {
    /// HTTP status code
    pub code: u16,

    /// Response headers
    pub headers: Vec<(String, String)>,
}

impl StatusMetadata {
    /// Create status metadata without headers
    pub fn new(code: u16) -> Self {
        Self {
            code,
            headers: Vec::new(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Check if the status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Get a header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Outcome of a successful exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The request that produced this response
    pub request: RequestDescriptor,

    /// Status and headers
    pub status: StatusMetadata,

    /// Response body, `None` when the server sent no bytes
    pub body: Option<Bytes>,
}

impl RawResponse {
    /// Create a response. An empty body is stored as `None`.
    pub fn new(request: RequestDescriptor, status: StatusMetadata, body: Option<Bytes>) -> Self {
        Self {
            request,
            status,
            body: body.filter(|b| !b.is_empty()),
        }
    }
}

/// One-shot stream of transport outcomes.
pub type OutcomeStream = Pin<Box<dyn Stream<Item = Result<RawResponse>> + Send>>;

/// Performs network exchanges on behalf of the API client.
///
/// Implementations must be shareable across threads; the client holds one
/// behind an `Arc` and calls it concurrently.
#[async_trait]
pub trait TransportService: Send + Sync + 'static {
    /// Perform the exchange and resolve once with its outcome.
    async fn execute(&self, request: RequestDescriptor) -> Result<RawResponse>;

    /// Perform the exchange as a stream that yields one outcome, then ends.
    ///
    /// Nothing is sent until the stream is first polled, and dropping the
    /// stream abandons the exchange. The default implementation wraps
    /// [`execute`](Self::execute).
    fn execute_stream(self: Arc<Self>, request: RequestDescriptor) -> OutcomeStream {
        Box::pin(futures::stream::once(async move {
            self.execute(request).await
        }))
    }
}
