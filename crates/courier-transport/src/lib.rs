//! Transport layer for courier
//!
//! Defines the [`TransportService`] capability the API client dispatches
//! through, the response model it produces, and a reqwest-backed
//! implementation.
//!
//! # Architecture
//!
//! - **Transport trait**: one exchange, as a future or a one-shot stream
//! - **HTTP transport**: REST client via reqwest, single attempt
//! - **Reachability**: injectable network-state observation
//! - **Observability**: structured `tracing` events shared with the client

#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Usage
//!
//! ```no_run
//! use courier_core::{HttpMethod, RequestDescriptor};
//! use courier_transport::{HttpTransport, TransportService};
//! use url::Url;
//!
//! # async fn run() -> courier_transport::Result<()> {
//! let transport = HttpTransport::new()?;
//! let url = Url::parse("https://api.example.com/v1/users/42").unwrap();
//! let response = transport
//!     .execute(RequestDescriptor::new(HttpMethod::Get, url))
//!     .await?;
//! println!("status {}", response.status.code);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod observability;
pub mod reachability;
pub mod traits;

// Re-export commonly used types
pub use error::{NetworkError, Result};
pub use http::{HttpTransport, HttpTransportConfig};
pub use reachability::{Reachability, ReachabilityMonitor, Subscription, WatchReachability};
pub use traits::{OutcomeStream, RawResponse, StatusMetadata, TransportService};
