//! API client: the request pipeline
//!
//! Every call goes through the same three steps:
//!
//! 1. **prepare**: serve from the fixture if the endpoint (or the client) is
//!    mocked, otherwise encode the parameters and build the request
//! 2. **dispatch**: hand the request to the transport, either as a single
//!    future or as a one-shot stream
//! 3. **decode**: turn the body into the requested type
//!
//! [`ApiClient::request_once`] awaits that pipeline directly;
//! [`ApiClient::request_stream`] wraps the very same pipeline in a
//! [`ResponseStream`].

use std::sync::Arc;

use bytes::Bytes;
use courier_core::{Codec, CodecConfig, Endpoint, HttpMethod, JsonCodec, RequestDescriptor};
use courier_transport::observability::RequestMetadata;
use courier_transport::{NetworkError, StatusMetadata, TransportService};
use futures::StreamExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use tracing::debug;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::envelope::{DefaultEnvelope, unwrap_envelope};
use crate::error::{ClientError, Result};
use crate::response::ApiResponse;
use crate::stream::ResponseStream;

/// Client that runs endpoint calls through a codec and a transport.
///
/// Cloning is cheap; clones share the transport and codec. The client keeps
/// no state between calls and may be used from many tasks at once.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use courier::{ApiClient, Empty, EndpointDescriptor, HttpMethod, HttpTransport};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: String,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(Arc::new(HttpTransport::new()?));
/// let endpoint = EndpointDescriptor::builder()
///     .base_url("https://api.example.com")
///     .version("v1")
///     .path("users/42")
///     .build()?;
///
/// let user: User = client
///     .request_once(&endpoint, None::<&Empty>, HttpMethod::Get)
///     .await?;
/// println!("{}", user.id);
/// # Ok(())
/// # }
/// ```
pub struct ApiClient<C: Codec = JsonCodec> {
    inner: Arc<ClientInner<C>>,
}

struct ClientInner<C> {
    transport: Arc<dyn TransportService>,
    codec: C,
    config: ClientConfig,
}

/// Outcome of the prepare step.
enum Prepared {
    Fixture(Option<Bytes>),
    Live(RequestDescriptor),
    Failed(ClientError),
}

impl Prepared {
    fn request_id(&self) -> Option<Uuid> {
        match self {
            Self::Live(request) => Some(request.id),
            _ => None,
        }
    }
}

/// How the prepared request reaches the transport.
#[derive(Debug, Clone, Copy)]
enum Dispatch {
    Once,
    Stream,
}

impl ApiClient<JsonCodec> {
    /// Create a client with the default JSON codec and configuration.
    pub fn new(transport: Arc<dyn TransportService>) -> Self {
        Self::builder(transport).build()
    }

    /// Create a builder for a client using `transport`.
    pub fn builder(transport: Arc<dyn TransportService>) -> ApiClientBuilder<JsonCodec> {
        ApiClientBuilder {
            transport,
            codec: JsonCodec::default(),
            config: ClientConfig::default(),
        }
    }
}

impl<C: Codec> ApiClient<C> {
    /// The client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The client's codec.
    pub fn codec(&self) -> &C {
        &self.inner.codec
    }

    /// Run a request and return the full response envelope.
    ///
    /// Never fails: errors are carried inside the [`ApiResponse`] together
    /// with whatever request and status metadata the call produced.
    pub async fn request<E, P, R>(
        &self,
        endpoint: &E,
        parameters: Option<&P>,
        method: HttpMethod,
    ) -> ApiResponse<R>
    where
        E: Endpoint + ?Sized,
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let prepared = self.inner.prepare(endpoint, parameters, method);
        self.inner.resolve(prepared, Dispatch::Once).await
    }

    /// Run a request and return the decoded body.
    ///
    /// `None` parameters send a request without a payload, which is not an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NetworkFailure`] if the transport failed
    /// - [`ClientError::ParsingJson`] if the body did not decode as `R`
    /// - [`ClientError::NoData`] if there was no body
    /// - [`ClientError::Generic`] if the request could not be built
    pub async fn request_once<E, P, R>(
        &self,
        endpoint: &E,
        parameters: Option<&P>,
        method: HttpMethod,
    ) -> Result<R>
    where
        E: Endpoint + ?Sized,
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(endpoint, parameters, method).await.into_result()
    }

    /// Run a request as a stream that yields one result.
    ///
    /// Parameters are encoded immediately; nothing is sent until the stream
    /// is first polled. Dropping or cancelling the stream before it yields
    /// abandons the transport call and skips decoding.
    pub fn request_stream<E, P, R>(
        &self,
        endpoint: &E,
        parameters: Option<&P>,
        method: HttpMethod,
    ) -> ResponseStream<R>
    where
        E: Endpoint + ?Sized,
        P: Serialize + ?Sized,
        R: DeserializeOwned + Send + 'static,
    {
        let prepared = self.inner.prepare(endpoint, parameters, method);
        let request_id = prepared.request_id();
        let inner = Arc::clone(&self.inner);
        self.stream(request_id, async move {
            inner.resolve(prepared, Dispatch::Stream).await.into_result()
        })
    }

    /// Decode bytes the caller already holds.
    ///
    /// # Errors
    ///
    /// [`ClientError::NoData`] for `None`, [`ClientError::ParsingJson`] if
    /// the bytes do not decode as `R`.
    pub fn decode_only<R>(&self, bytes: Option<&[u8]>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.inner.decode(bytes)
    }

    /// Decode bytes the caller already holds, as a one-result stream.
    pub fn decode_only_stream<R>(&self, bytes: Option<Bytes>) -> ResponseStream<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        self.stream(None, async move { inner.decode(bytes.as_deref()) })
    }

    /// Run a request whose body is a [`DefaultEnvelope`] and return its data.
    ///
    /// See [`unwrap_envelope`] for the rules.
    pub async fn request_unwrapped<E, P, R>(
        &self,
        endpoint: &E,
        parameters: Option<&P>,
        method: HttpMethod,
    ) -> Result<R>
    where
        E: Endpoint + ?Sized,
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        unwrap_envelope(self.request::<E, P, DefaultEnvelope<R>>(endpoint, parameters, method).await)
    }

    /// Stream form of [`request_unwrapped`](Self::request_unwrapped).
    pub fn request_unwrapped_stream<E, P, R>(
        &self,
        endpoint: &E,
        parameters: Option<&P>,
        method: HttpMethod,
    ) -> ResponseStream<R>
    where
        E: Endpoint + ?Sized,
        P: Serialize + ?Sized,
        R: DeserializeOwned + Send + 'static,
    {
        let prepared = self.inner.prepare(endpoint, parameters, method);
        let request_id = prepared.request_id();
        let inner = Arc::clone(&self.inner);
        self.stream(request_id, async move {
            unwrap_envelope(inner.resolve::<DefaultEnvelope<R>>(prepared, Dispatch::Stream).await)
        })
    }

    fn stream<R, F>(&self, request_id: Option<Uuid>, future: F) -> ResponseStream<R>
    where
        R: Send + 'static,
        F: Future<Output = Result<R>> + Send + 'static,
    {
        ResponseStream::new(future, self.inner.config.delivery.clone(), request_id)
    }
}

impl<C: Codec> ClientInner<C> {
    fn prepare<E, P>(&self, endpoint: &E, parameters: Option<&P>, method: HttpMethod) -> Prepared
    where
        E: Endpoint + ?Sized,
        P: Serialize + ?Sized,
    {
        if self.config.use_fixtures || endpoint.is_mocked() {
            debug!(method = %method, path = %endpoint.path(), "Serving request from fixture");
            return Prepared::Fixture(endpoint.fixture());
        }

        let payload = match self.codec.encode(parameters) {
            Ok(payload) => payload,
            Err(e) => return Prepared::Failed(e.into()),
        };
        match endpoint.to_request(method, payload) {
            Ok(request) => Prepared::Live(request),
            Err(e) => Prepared::Failed(e.into()),
        }
    }

    async fn resolve<R>(&self, prepared: Prepared, dispatch: Dispatch) -> ApiResponse<R>
    where
        R: DeserializeOwned,
    {
        let request = match prepared {
            Prepared::Failed(err) => return ApiResponse::new(None, None, Err(err)),
            Prepared::Fixture(bytes) => {
                return ApiResponse::new(None, None, self.decode(bytes.as_deref()));
            }
            Prepared::Live(request) => request,
        };

        let metadata = RequestMetadata::from_request(&request);
        metadata.log_step("dispatch");
        let outcome = match dispatch {
            Dispatch::Once => self.transport.execute(request.clone()).await,
            Dispatch::Stream => Arc::clone(&self.transport)
                .execute_stream(request.clone())
                .next()
                .await
                .unwrap_or(Err(NetworkError::Cancelled)),
        };

        match outcome {
            Ok(raw) => {
                metadata.log_step("decode");
                let decoded = self.decode(raw.body.as_deref());
                ApiResponse::new(Some(raw.request), Some(raw.status), decoded)
            }
            Err(err) => {
                let status = err.status_code().map(StatusMetadata::new);
                ApiResponse::new(Some(request), status, Err(err.into()))
            }
        }
    }

    fn decode<R>(&self, bytes: Option<&[u8]>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let bytes = bytes.ok_or(ClientError::NoData)?;
        Ok(self.codec.decode(bytes)?)
    }
}

impl<C: Codec> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Codec> std::fmt::Debug for ApiClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("codec", &self.inner.codec)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder<C: Codec = JsonCodec> {
    transport: Arc<dyn TransportService>,
    codec: C,
    config: ClientConfig,
}

impl ApiClientBuilder<JsonCodec> {
    /// Use a JSON codec with these settings.
    pub fn codec_config(mut self, config: CodecConfig) -> Self {
        self.codec = JsonCodec::new(config);
        self
    }
}

impl<C: Codec> ApiClientBuilder<C> {
    /// Use a custom codec.
    pub fn codec<C2: Codec>(self, codec: C2) -> ApiClientBuilder<C2> {
        ApiClientBuilder {
            transport: self.transport,
            codec,
            config: self.config,
        }
    }

    /// Replace the whole client configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Serve every call from its endpoint's fixture.
    pub fn use_fixtures(mut self, use_fixtures: bool) -> Self {
        self.config.use_fixtures = use_fixtures;
        self
    }

    /// Run stream pipelines on `handle`.
    pub fn delivery(mut self, handle: Handle) -> Self {
        self.config.delivery = Some(handle);
        self
    }

    /// Build the client.
    pub fn build(self) -> ApiClient<C> {
        ApiClient {
            inner: Arc::new(ClientInner {
                transport: self.transport,
                codec: self.codec,
                config: self.config,
            }),
        }
    }
}
