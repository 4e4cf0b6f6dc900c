//! JSON codec for request parameters and response bodies.
//!
//! - [`Codec`] is the capability the pipeline depends on
//! - [`JsonCodec`] is the `serde_json` implementation
//! - [`casing`] rewrites object keys for [`KeyStrategy::SnakeCase`]
//! - [`date`] renders `chrono` timestamps in the codec's configured format

pub mod casing;
mod codec;
pub mod date;

pub use codec::{
    Codec, CodecConfig, CodecError, DEFAULT_DATE_FORMAT, JsonCodec, KeyStrategy,
};
