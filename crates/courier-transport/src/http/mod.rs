//! HTTP transport implementation
//!
//! Provides a reqwest-backed client that implements the `TransportService`
//! trait, plus the query-string encoding it uses for safe methods.

pub mod client;
pub mod encoding;

pub use client::{HttpTransport, HttpTransportConfig};
