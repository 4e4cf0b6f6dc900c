//! # courier
//!
//! Typed API request pipeline over interchangeable transports:
//! - Declarative endpoints via the [`Endpoint`] trait
//! - JSON encoding and decoding with configurable key casing and dates
//! - One call shape that awaits, one that streams, over the same pipeline
//! - Fixture responses that bypass the transport entirely
//! - A closed error taxonomy: every failure is one [`ClientError`] kind
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use courier::{ApiClient, EndpointDescriptor, HttpMethod, HttpTransport};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct Search {
//!     query: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Page {
//!     total: u32,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(Arc::new(HttpTransport::new()?));
//!     let endpoint = EndpointDescriptor::builder()
//!         .base_url("https://api.example.com")
//!         .version("v2")
//!         .path("search")
//!         .build()?;
//!
//!     let page: Page = client
//!         .request_once(&endpoint, Some(&Search { query: "rust".into() }), HttpMethod::Get)
//!         .await?;
//!
//!     println!("{} results", page.total);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use envelope::{DefaultEnvelope, EnvelopeError, EnvelopeStatus, unwrap_envelope};
pub use error::{ClientError, Result};
pub use response::{ApiResponse, Empty};
pub use stream::ResponseStream;

pub use courier_core::{
    Codec, CodecConfig, CodecError, Endpoint, EndpointDescriptor, EndpointError, HttpMethod,
    JsonCodec, KeyStrategy, Payload, RequestDescriptor,
};
pub use courier_transport::{
    HttpTransport, HttpTransportConfig, NetworkError, RawResponse, Reachability,
    ReachabilityMonitor, StatusMetadata, TransportService, WatchReachability,
};

// Module declarations
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod response;
pub mod stream;

/// Structured logging helpers shared with the transport layer.
pub use courier_transport::observability;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
