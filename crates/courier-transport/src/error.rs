//! Transport error types

use bytes::Bytes;
use courier_core::BoxError;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Failure kinds a transport reports for one exchange.
///
/// The API client never interprets these beyond wrapping them, so a
/// transport is free to pick whichever kind describes the failure best.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The server answered with a non-success status
    #[error("server responded with status {status_code}")]
    ServerError {
        /// Response body, if the server sent one
        body: Option<Bytes>,
        /// HTTP status code
        status_code: u16,
    },

    /// No connection could be established
    #[error("not connected to the network")]
    NotConnected,

    /// The exchange was cancelled before it completed
    #[error("request was cancelled")]
    Cancelled,

    /// Any other transport failure
    #[error("transport error: {0}")]
    Generic(#[source] BoxError),

    /// A request URL could not be built
    #[error("could not build request URL")]
    UrlGeneration,

    /// The resource does not exist
    #[error("resource not found")]
    NotFound,

    /// The exchange completed without a body where one was required
    #[error("response contained no data")]
    NoData,

    /// The response could not be interpreted as HTTP
    #[error("invalid response")]
    InvalidResponse,

    /// The response was well-formed but rejected by the transport
    #[error("bad response{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    BadResponse(Option<String>),
}

impl NetworkError {
    /// Wrap any error as [`NetworkError::Generic`].
    pub fn generic(err: impl Into<BoxError>) -> Self {
        Self::Generic(err.into())
    }

    /// The HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ServerError { status_code, .. } => Some(*status_code),
            Self::NotFound => Some(404),
            _ => None,
        }
    }

    /// Whether the exchange was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
