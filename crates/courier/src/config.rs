//! Configuration for the API client

use tokio::runtime::Handle;

/// Configuration for [`ApiClient`](crate::ApiClient).
///
/// Codec settings live on the codec itself; see
/// [`ApiClientBuilder::codec_config`](crate::ApiClientBuilder::codec_config).
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Serve every call from its endpoint's fixture, as if every endpoint
    /// were mocked. The transport is never contacted.
    pub use_fixtures: bool,

    /// Runtime that stream pipelines run on.
    ///
    /// When set, a [`ResponseStream`](crate::ResponseStream) spawns its work
    /// on this runtime at first poll and the subscriber only receives the
    /// result. When unset the subscriber drives the work itself.
    pub delivery: Option<Handle>,
}

impl ClientConfig {
    /// Enable or disable fixture mode
    pub fn with_fixtures(mut self, use_fixtures: bool) -> Self {
        self.use_fixtures = use_fixtures;
        self
    }

    /// Set the delivery runtime
    pub fn with_delivery(mut self, handle: Handle) -> Self {
        self.delivery = Some(handle);
        self
    }
}
