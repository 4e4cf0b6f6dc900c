//! Response envelope returned by a pipeline call.

use courier_core::RequestDescriptor;
use courier_transport::StatusMetadata;
use serde::Serialize;
use serde::ser::SerializeMap;

use crate::error::{ClientError, Result};

/// Normalized result of one pipeline call.
///
/// Carries whatever request and status metadata the call produced alongside
/// either the decoded body or the error. Fixture calls have neither request
/// nor status; a call that failed after the server answered keeps its status.
#[derive(Debug)]
pub struct ApiResponse<T> {
    request: Option<RequestDescriptor>,
    status: Option<StatusMetadata>,
    data: Option<T>,
    error: Option<ClientError>,
}

impl<T> ApiResponse<T> {
    pub(crate) fn new(
        request: Option<RequestDescriptor>,
        status: Option<StatusMetadata>,
        outcome: Result<T>,
    ) -> Self {
        let (data, error) = match outcome {
            Ok(data) => (Some(data), None),
            Err(err) => (None, Some(err)),
        };
        Self {
            request,
            status,
            data,
            error,
        }
    }

    /// The request that was sent, absent for fixture responses.
    pub fn request(&self) -> Option<&RequestDescriptor> {
        self.request.as_ref()
    }

    /// Status and headers, when the exchange reached the server.
    pub fn status(&self) -> Option<&StatusMetadata> {
        self.status.as_ref()
    }

    /// The decoded body.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The error, if the call failed.
    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    /// Whether a body was decoded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Take the decoded body, or the error.
    pub fn into_result(self) -> Result<T> {
        match (self.data, self.error) {
            (_, Some(err)) => Err(err),
            (Some(data), None) => Ok(data),
            (None, None) => Err(ClientError::NoData),
        }
    }

    /// Take the decoded body, discarding the error.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Split into all four parts.
    pub fn into_parts(
        self,
    ) -> (
        Option<RequestDescriptor>,
        Option<StatusMetadata>,
        Option<T>,
        Option<ClientError>,
    ) {
        (self.request, self.status, self.data, self.error)
    }
}

/// Parameters for a call that sends none.
///
/// Encodes to an empty object: no query pairs for safe methods, `{}` as the
/// body for the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Empty;

impl Serialize for Empty {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_map(Some(0))?.end()
    }
}
