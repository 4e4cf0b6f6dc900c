//! Error types for the courier client
//!
//! Every pipeline call ends in either a value or one of the five
//! [`ClientError`] kinds. Transport failures are wrapped unchanged, decode
//! failures keep their parse error as the source, and anything else is
//! carried as [`ClientError::Generic`].

use courier_core::{BoxError, CodecError, EndpointError, error_boundary};
use courier_transport::NetworkError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client-level error.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A response body could not be decoded into the requested type.
    #[error("Failed to parse response: {0}")]
    ParsingJson(#[source] CodecError),

    /// The transport reported a failure.
    #[error("Network failure: {0}")]
    NetworkFailure(#[source] NetworkError),

    /// Any other failure while preparing or running a request.
    #[error("{0}")]
    Generic(#[source] BoxError),

    /// The response carried no body to decode.
    #[error("Response contained no data")]
    NoData,

    /// The response was rejected by an application-level convention.
    #[error("Invalid response{}", describe(.title, .message))]
    InvalidResponse {
        /// Short error title, if the server supplied one
        title: Option<String>,
        /// Human-readable detail, if the server supplied one
        message: Option<String>,
    },
}

fn describe(title: &Option<String>, message: &Option<String>) -> String {
    match (title, message) {
        (Some(title), Some(message)) => format!(": {title}: {message}"),
        (Some(text), None) | (None, Some(text)) => format!(": {text}"),
        (None, None) => String::new(),
    }
}

impl ClientError {
    /// Wrap any error as [`ClientError::Generic`].
    pub fn generic(err: impl Into<BoxError>) -> Self {
        Self::Generic(err.into())
    }

    /// An [`InvalidResponse`](Self::InvalidResponse) without diagnostics.
    pub fn invalid_response() -> Self {
        Self::InvalidResponse {
            title: None,
            message: None,
        }
    }

    /// The wrapped transport error, if this is a network failure.
    pub fn network_error(&self) -> Option<&NetworkError> {
        match self {
            Self::NetworkFailure(err) => Some(err),
            _ => None,
        }
    }

    /// Server-supplied diagnostic text, if any.
    ///
    /// Prefers the message of an [`InvalidResponse`](Self::InvalidResponse)
    /// over its title, and falls back to the body of a server error when it
    /// is valid UTF-8.
    pub fn diagnostic_message(&self) -> Option<&str> {
        match self {
            Self::InvalidResponse { title, message } => {
                message.as_deref().or(title.as_deref())
            }
            Self::NetworkFailure(NetworkError::ServerError {
                body: Some(body), ..
            }) => std::str::from_utf8(body).ok(),
            Self::NetworkFailure(NetworkError::BadResponse(message)) => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the request was cancelled before it completed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::NetworkFailure(err) if err.is_cancelled())
    }
}

error_boundary!(NetworkError => ClientError, |e| ClientError::NetworkFailure(e));

error_boundary!(CodecError => ClientError, |e| {
    if e.is_decode() {
        ClientError::ParsingJson(e)
    } else {
        ClientError::Generic(Box::new(e))
    }
});

error_boundary!(EndpointError => ClientError, |e| ClientError::Generic(Box::new(e)));

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::error::Error as _;

    #[test]
    fn test_network_boundary_wraps_unchanged() {
        let err: ClientError = NetworkError::NotFound.into();
        assert!(matches!(
            err.network_error(),
            Some(NetworkError::NotFound)
        ));
    }

    #[test]
    fn test_codec_boundary() {
        let parse = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err: ClientError = CodecError::Decode(parse).into();
        assert!(matches!(err, ClientError::ParsingJson(_)));

        let err: ClientError = CodecError::NotAnObject("an array").into();
        assert!(matches!(err, ClientError::Generic(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_endpoint_boundary_is_generic() {
        let err: ClientError = EndpointError::MissingBaseUrl.into();
        assert!(matches!(err, ClientError::Generic(_)));
        assert_eq!(err.to_string(), EndpointError::MissingBaseUrl.to_string());
    }

    #[test]
    fn test_diagnostic_message() {
        let err = ClientError::InvalidResponse {
            title: Some("Failure".into()),
            message: Some("boom".into()),
        };
        assert_eq!(err.diagnostic_message(), Some("boom"));
        assert_eq!(err.to_string(), "Invalid response: Failure: boom");

        let err = ClientError::NetworkFailure(NetworkError::ServerError {
            body: Some(Bytes::from_static(b"maintenance")),
            status_code: 503,
        });
        assert_eq!(err.diagnostic_message(), Some("maintenance"));

        assert_eq!(ClientError::NoData.diagnostic_message(), None);
        assert_eq!(ClientError::invalid_response().to_string(), "Invalid response");
    }

    #[test]
    fn test_is_cancelled() {
        assert!(ClientError::NetworkFailure(NetworkError::Cancelled).is_cancelled());
        assert!(!ClientError::NoData.is_cancelled());
    }
}
