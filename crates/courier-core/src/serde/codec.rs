use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::casing::to_snake_keys;
use super::date::DateFormatScope;
use crate::request::Payload;

/// Date format used when none is configured: ISO-8601 with milliseconds.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// How object keys are written when encoding and read when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStrategy {
    /// Rewrite keys to snake_case in both directions.
    ///
    /// Decoding matches the rewritten keys against the type's serde names,
    /// so types used with this strategy must keep snake_case serde names
    /// (plain Rust field names, no `rename_all`). Types with renamed fields
    /// round-trip only under [`KeyStrategy::Verbatim`].
    #[default]
    SnakeCase,
    /// Use keys exactly as the serde derives produce them
    Verbatim,
}

/// Codec settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Key naming strategy
    pub key_strategy: KeyStrategy,

    /// `chrono` format string for fields using [`date`](super::date)
    pub date_format: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            key_strategy: KeyStrategy::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl CodecConfig {
    /// Set the key strategy
    pub fn key_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.key_strategy = strategy;
        self
    }

    /// Set the date format
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}

/// Errors produced by a [`Codec`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Parameters could not be serialized
    #[error("failed to encode parameters: {0}")]
    Encode(#[source] serde_json::Error),

    /// A response body could not be parsed into the requested type
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Parameters serialized to something other than a key/value object
    #[error("parameters must encode to an object, got {0}")]
    NotAnObject(&'static str),
}

impl CodecError {
    /// Whether this error happened while decoding a response body.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Converts request parameters to a [`Payload`] and response bytes to values.
///
/// Implementations must be usable from any thread; the client shares one
/// codec across every request it issues.
pub trait Codec: Send + Sync + fmt::Debug + 'static {
    /// Encode parameters. `None` encodes to `None`.
    fn encode<P>(&self, params: Option<&P>) -> Result<Option<Payload>, CodecError>
    where
        P: Serialize + ?Sized;

    /// Decode a response body.
    fn decode<T>(&self, bytes: &[u8]) -> Result<T, CodecError>
    where
        T: DeserializeOwned;
}

/// [`Codec`] backed by `serde_json`.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    key_strategy: KeyStrategy,
    date_format: Arc<str>,
}

impl JsonCodec {
    /// Create a codec from its configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            key_strategy: config.key_strategy,
            date_format: Arc::from(config.date_format),
        }
    }

    /// The key strategy in effect.
    pub fn key_strategy(&self) -> KeyStrategy {
        self.key_strategy
    }

    fn scope(&self) -> DateFormatScope {
        DateFormatScope::enter(Arc::clone(&self.date_format))
    }

    fn rewrite_keys(&self, value: &mut Value) {
        if self.key_strategy == KeyStrategy::SnakeCase {
            to_snake_keys(value);
        }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl Codec for JsonCodec {
    fn encode<P>(&self, params: Option<&P>) -> Result<Option<Payload>, CodecError>
    where
        P: Serialize + ?Sized,
    {
        let Some(params) = params else {
            return Ok(None);
        };

        let mut value = {
            let _scope = self.scope();
            serde_json::to_value(params).map_err(CodecError::Encode)?
        };
        self.rewrite_keys(&mut value);

        match value {
            Value::Object(map) => Ok(Some(map)),
            other => Err(CodecError::NotAnObject(kind(&other))),
        }
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T, CodecError>
    where
        T: DeserializeOwned,
    {
        let _scope = self.scope();
        match self.key_strategy {
            KeyStrategy::Verbatim => serde_json::from_slice(bytes).map_err(CodecError::Decode),
            KeyStrategy::SnakeCase => {
                let mut value: Value =
                    serde_json::from_slice(bytes).map_err(CodecError::Decode)?;
                to_snake_keys(&mut value);
                serde_json::from_value(value).map_err(CodecError::Decode)
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
