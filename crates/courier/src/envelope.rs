//! `{status, data, error}` response envelopes.
//!
//! Some APIs wrap every body as
//!
//! ```json
//! {"status": "success", "data": {...}}
//! {"status": "error", "error": {"title": "...", "message": "..."}}
//! ```
//!
//! [`unwrap_envelope`] turns an [`ApiResponse`] of such a body into the inner
//! data or a [`ClientError`]. [`ApiClient::request_unwrapped`] and
//! [`ApiClient::request_unwrapped_stream`] run a request and unwrap in one
//! step.
//!
//! [`ApiClient::request_unwrapped`]: crate::ApiClient::request_unwrapped
//! [`ApiClient::request_unwrapped_stream`]: crate::ApiClient::request_unwrapped_stream

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::response::ApiResponse;

/// Application-level outcome reported inside the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The call succeeded and `data` holds the result
    Success,
    /// The call failed and `error` describes why
    Error,
}

/// Error details carried by an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    /// Short error title
    pub title: Option<String>,
    /// Human-readable detail
    pub message: Option<String>,
}

/// The standard envelope shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultEnvelope<T> {
    /// Outcome
    pub status: EnvelopeStatus,
    /// Result, present on success
    pub data: Option<T>,
    /// Failure details, usually present on error
    pub error: Option<EnvelopeError>,
}

/// Extract the data from an enveloped response.
///
/// Checks run in this order, and the first that applies decides:
///
/// 1. A status code other than 200 fails with `InvalidResponse`, whatever the
///    body held. This includes transport failures that carry a status, such
///    as `ServerError` and `NotFound`. Fixture responses carry no status and
///    skip this check.
/// 2. Any other pipeline error is returned unchanged.
/// 3. An `error` envelope fails with `InvalidResponse`, keeping its title and
///    message.
/// 4. A `success` envelope without `data` fails with `NoData`.
pub fn unwrap_envelope<T>(response: ApiResponse<DefaultEnvelope<T>>) -> Result<T> {
    let (_, status, envelope, error) = response.into_parts();

    if status.is_some_and(|s| s.code != 200) {
        return Err(ClientError::invalid_response());
    }
    if let Some(err) = error {
        return Err(err);
    }

    let envelope = envelope.ok_or(ClientError::NoData)?;
    match envelope.status {
        EnvelopeStatus::Success => envelope.data.ok_or(ClientError::NoData),
        EnvelopeStatus::Error => {
            let EnvelopeError { title, message } = envelope.error.unwrap_or_default();
            Err(ClientError::InvalidResponse { title, message })
        }
    }
}
