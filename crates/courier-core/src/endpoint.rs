//! The endpoint contract.
//!
//! An endpoint describes one logical API call: where it goes, which headers it
//! carries, how long it may take, and whether a canned fixture should be
//! returned instead of contacting the network.
//!
//! Applications usually implement [`Endpoint`] on an enum of their calls;
//! [`EndpointDescriptor`] is a ready-made implementation built at runtime.
//!
//! ```rust
//! use std::borrow::Cow;
//! use courier_core::Endpoint;
//! use url::Url;
//!
//! enum UserApi {
//!     Fetch(String),
//!     Update(String),
//! }
//!
//! impl Endpoint for UserApi {
//!     fn base_url(&self) -> Url {
//!         Url::parse("https://api.example.com").expect("static URL")
//!     }
//!
//!     fn version(&self) -> &str {
//!         "v1/users"
//!     }
//!
//!     fn path(&self) -> Cow<'_, str> {
//!         match self {
//!             UserApi::Fetch(id) => Cow::Borrowed(id),
//!             UserApi::Update(id) => Cow::Owned(format!("{id}/update")),
//!         }
//!     }
//! }
//!
//! let url = UserApi::Update("12345".into()).url().unwrap();
//! assert_eq!(url.as_str(), "https://api.example.com/v1/users/12345/update");
//! ```

use std::borrow::Cow;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderName, HeaderValue};
use url::Url;

use crate::error::EndpointError;
use crate::method::HttpMethod;
use crate::request::{Payload, RequestDescriptor};

/// Timeout applied when an endpoint does not choose its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Description of one logical API call.
///
/// Only [`base_url`](Endpoint::base_url) and [`path`](Endpoint::path) are
/// required; everything else has a default.
pub trait Endpoint: Send + Sync {
    /// Base location of the API.
    fn base_url(&self) -> Url;

    /// Version segment inserted between the base URL and the path.
    fn version(&self) -> &str {
        ""
    }

    /// Path of the call, relative to `base_url/version`.
    fn path(&self) -> Cow<'_, str>;

    /// Headers sent with the call, in order.
    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Timeout for the whole exchange.
    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    /// When `true` the fixture is returned and the transport is never contacted.
    fn is_mocked(&self) -> bool {
        false
    }

    /// Canned response body used when the endpoint is mocked.
    fn fixture(&self) -> Option<Bytes> {
        None
    }

    /// Full request URL: `base_url/version/path`.
    ///
    /// Empty segments are skipped, so a missing version or leading and
    /// trailing slashes never produce `//` in the result.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::InvalidUrl`] if the base URL cannot carry path
    /// segments (for example `mailto:` URLs).
    fn url(&self) -> Result<Url, EndpointError> {
        let base = self.base_url();
        let mut url = base.clone();
        let path = self.path();
        {
            let mut segments = url.path_segments_mut().map_err(|()| EndpointError::InvalidUrl {
                url: base.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?;
            segments.pop_if_empty();
            for segment in self
                .version()
                .split('/')
                .chain(path.split('/'))
                .filter(|s| !s.is_empty())
            {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    /// Build the transport-agnostic request for this endpoint.
    ///
    /// # Errors
    ///
    /// Fails if the URL cannot be derived or a header is not valid HTTP.
    fn to_request(
        &self,
        method: HttpMethod,
        parameters: Option<Payload>,
    ) -> Result<RequestDescriptor, EndpointError> {
        let headers = self.headers();
        for (name, value) in &headers {
            validate_header(name, value)?;
        }

        let mut request = RequestDescriptor::new(method, self.url()?)
            .with_parameters(parameters)
            .with_timeout(self.timeout());
        request.headers = headers;
        Ok(request)
    }
}

fn validate_header(name: &str, value: &str) -> Result<(), EndpointError> {
    name.parse::<HeaderName>()
        .map_err(|e| EndpointError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
    value
        .parse::<HeaderValue>()
        .map_err(|e| EndpointError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(())
}

/// An endpoint assembled at runtime.
///
/// Immutable once built. Construct it with [`EndpointDescriptor::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescriptor {
    base_url: Url,
    version: String,
    path: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    use_fixture: bool,
    fixture: Option<Bytes>,
}

impl EndpointDescriptor {
    /// Create a new builder.
    pub fn builder() -> EndpointDescriptorBuilder {
        EndpointDescriptorBuilder::default()
    }
}

impl Endpoint for EndpointDescriptor {
    fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.path)
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn is_mocked(&self) -> bool {
        self.use_fixture
    }

    fn fixture(&self) -> Option<Bytes> {
        self.fixture.clone()
    }
}

/// Builder for [`EndpointDescriptor`].
#[derive(Debug, Clone)]
pub struct EndpointDescriptorBuilder {
    base_url: Option<String>,
    version: String,
    path: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    use_fixture: bool,
    fixture: Option<Bytes>,
}

impl Default for EndpointDescriptorBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            version: String::new(),
            path: String::new(),
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            use_fixture: false,
            fixture: None,
        }
    }
}

impl EndpointDescriptorBuilder {
    /// Set the base URL (required).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the version segment.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Append a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Serve the fixture instead of contacting the transport.
    pub fn use_fixture(mut self, use_fixture: bool) -> Self {
        self.use_fixture = use_fixture;
        self
    }

    /// Set the fixture body.
    pub fn fixture(mut self, fixture: impl Into<Bytes>) -> Self {
        self.fixture = Some(fixture.into());
        self
    }

    /// Build the endpoint.
    ///
    /// # Errors
    ///
    /// - [`EndpointError::MissingBaseUrl`] if no base URL was given
    /// - [`EndpointError::InvalidUrl`] if it does not parse or cannot carry a path
    /// - [`EndpointError::InvalidHeader`] if a header is not valid HTTP
    pub fn build(self) -> Result<EndpointDescriptor, EndpointError> {
        let raw = self.base_url.ok_or(EndpointError::MissingBaseUrl)?;
        let base_url = Url::parse(&raw).map_err(|e| EndpointError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EndpointError::InvalidUrl {
                url: raw,
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        for (name, value) in &self.headers {
            validate_header(name, value)?;
        }

        Ok(EndpointDescriptor {
            base_url,
            version: self.version,
            path: self.path,
            headers: self.headers,
            timeout: self.timeout,
            use_fixture: self.use_fixture,
            fixture: self.fixture,
        })
    }
}
