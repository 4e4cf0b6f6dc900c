//! Transport-agnostic request description.
//!
//! A [`RequestDescriptor`] is everything a transport needs to perform one
//! exchange. It is built from an [`Endpoint`](crate::Endpoint) and an encoded
//! parameter payload, and carries no behavior of its own.

use std::time::Duration;

use url::Url;
use uuid::Uuid;

use crate::method::HttpMethod;

/// Encoded request parameters: an ordered key/value mapping.
///
/// Key order follows the order in which the codec produced the keys.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// A single request, described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Identifier used to correlate log events for this request
    pub id: Uuid,

    /// HTTP method
    pub method: HttpMethod,

    /// Fully derived request URL (`base/version/path`)
    pub url: Url,

    /// Request headers, in declaration order
    pub headers: Vec<(String, String)>,

    /// Timeout for the whole exchange
    pub timeout: Duration,

    /// Encoded parameters, `None` for a request without parameters
    pub parameters: Option<Payload>,
}

impl RequestDescriptor {
    /// Create a request with no headers, no parameters and the default timeout.
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            url,
            headers: Vec::new(),
            timeout: crate::endpoint::DEFAULT_TIMEOUT,
            parameters: None,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set the encoded parameters
    pub fn with_parameters(mut self, parameters: Option<Payload>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get a header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
