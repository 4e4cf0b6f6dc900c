#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core abstractions for the courier request pipeline.
//!
//! This crate holds the pieces that every other courier crate agrees on and
//! that never touch the network:
//!
//! - **Endpoint contract** via the [`Endpoint`] trait and the ready-made
//!   [`EndpointDescriptor`]
//! - **HTTP methods** with their semantic flags via [`HttpMethod`]
//! - **Transport-agnostic requests** via [`RequestDescriptor`]
//! - **JSON codec** via the [`Codec`] trait and [`JsonCodec`], with
//!   configurable key casing and date format
//! - **Declarative error boundaries** via the `error_boundary!` macro
//!
//! # Examples
//!
//! ```rust
//! use courier_core::prelude::*;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoint = EndpointDescriptor::builder()
//!     .base_url("https://api.example.com")
//!     .version("v1")
//!     .path("users/42")
//!     .header("Accept", "application/json")
//!     .build()?;
//!
//! assert_eq!(endpoint.url()?.as_str(), "https://api.example.com/v1/users/42");
//! # Ok(())
//! # }
//! ```

pub mod endpoint;
pub mod error;
pub mod method;
pub mod request;
pub mod serde;

pub use endpoint::{DEFAULT_TIMEOUT, Endpoint, EndpointDescriptor, EndpointDescriptorBuilder};
pub use error::{BoxError, EndpointError};
pub use method::{HttpMethod, UnknownMethod};
pub use request::{Payload, RequestDescriptor};
pub use crate::serde::{Codec, CodecConfig, CodecError, JsonCodec, KeyStrategy};

/// Convenient re-exports of commonly used items.
///
/// Import all core abstractions with:
///
/// ```rust
/// use courier_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::endpoint::{Endpoint, EndpointDescriptor};
    pub use crate::error_boundary;
    pub use crate::method::HttpMethod;
    pub use crate::request::{Payload, RequestDescriptor};
    pub use crate::serde::{Codec, CodecConfig, JsonCodec, KeyStrategy};
}
