//! Common test utilities and helpers

#![allow(dead_code)]

pub mod fake_transport;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use courier::{Codec, CodecError, EndpointDescriptor, JsonCodec, Payload};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use fake_transport::FakeTransport;

/// Base URL used by endpoints that never reach a real server
pub const TEST_BASE_URL: &str = "https://api.example.com";

/// An endpoint for `GET /v1/users/42` with the given fixture settings
pub fn user_endpoint(use_fixture: bool, fixture: Option<&'static [u8]>) -> EndpointDescriptor {
    let mut builder = EndpointDescriptor::builder()
        .base_url(TEST_BASE_URL)
        .version("v1")
        .path("users/42")
        .header("Accept", "application/json")
        .use_fixture(use_fixture);
    if let Some(fixture) = fixture {
        builder = builder.fixture(Bytes::from_static(fixture));
    }
    builder.build().expect("valid test endpoint")
}

/// JSON codec that counts how many decodes it performed
#[derive(Debug, Clone, Default)]
pub struct CountingCodec {
    inner: JsonCodec,
    decodes: Arc<AtomicUsize>,
}

impl CountingCodec {
    /// Number of decode calls so far
    pub fn decodes(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }
}

impl Codec for CountingCodec {
    fn encode<P>(&self, params: Option<&P>) -> Result<Option<Payload>, CodecError>
    where
        P: Serialize + ?Sized,
    {
        self.inner.encode(params)
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T, CodecError>
    where
        T: DeserializeOwned,
    {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        self.inner.decode(bytes)
    }
}
