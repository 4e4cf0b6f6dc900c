//! Error types shared by the courier crates.

mod boundary;

/// Boxed error used wherever a foreign cause has to be carried opaquely.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while constructing an endpoint or deriving its URL.
///
/// These surface when the endpoint is built, not when a request runs: an
/// endpoint without a base location cannot be constructed at all.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// No base URL was supplied to the builder.
    #[error("endpoint has no base URL")]
    MissingBaseUrl,

    /// The base URL could not be parsed or cannot carry path segments.
    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL text
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A header name or value contains characters HTTP does not allow.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as supplied
        name: String,
        /// Why it was rejected
        reason: String,
    },
}
