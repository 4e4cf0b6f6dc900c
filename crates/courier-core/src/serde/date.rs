//! Timestamp fields rendered in the codec's date format.
//!
//! Use with `#[serde(with = "courier_core::serde::date")]` on a
//! `DateTime<Utc>` field, or `courier_core::serde::date::option` on an
//! `Option<DateTime<Utc>>`. While a [`JsonCodec`](super::JsonCodec) is
//! encoding or decoding, the format comes from its [`CodecConfig`]; outside
//! the codec, [`DEFAULT_DATE_FORMAT`] applies.
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "courier_core::serde::date")]
//!     created_at: DateTime<Utc>,
//! }
//! ```
//!
//! [`CodecConfig`]: super::CodecConfig

use std::cell::RefCell;
use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de, ser};

use super::codec::DEFAULT_DATE_FORMAT;

thread_local! {
    static ACTIVE_FORMAT: RefCell<Option<Arc<str>>> = const { RefCell::new(None) };
}

/// Makes `format` the active date format on this thread until dropped.
///
/// Scopes nest: dropping one restores whatever was active before it.
#[must_use = "the format is only active while the scope is alive"]
pub struct DateFormatScope {
    previous: Option<Arc<str>>,
}

impl DateFormatScope {
    /// Activate `format` for the current thread.
    pub fn enter(format: Arc<str>) -> Self {
        let previous = ACTIVE_FORMAT.with(|cell| cell.borrow_mut().replace(format));
        Self { previous }
    }
}

impl Drop for DateFormatScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE_FORMAT.with(|cell| *cell.borrow_mut() = previous);
    }
}

fn with_active_format<R>(f: impl FnOnce(&str) -> R) -> R {
    ACTIVE_FORMAT.with(|cell| match cell.borrow().as_deref() {
        Some(format) => f(format),
        None => f(DEFAULT_DATE_FORMAT),
    })
}

/// Render `value` in the active format.
pub fn format(value: &DateTime<Utc>) -> Result<String, std::fmt::Error> {
    with_active_format(|format| {
        let mut out = String::new();
        write!(out, "{}", value.format(format))?;
        Ok(out)
    })
}

/// Parse `text` with the active format.
///
/// A format without an offset is read as UTC.
pub fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    with_active_format(|format| match DateTime::parse_from_str(text, format) {
        Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
        Err(offset_err) => NaiveDateTime::parse_from_str(text, format)
            .map(|naive| naive.and_utc())
            .map_err(|_| offset_err),
    })
}

/// Serialize a timestamp as a string in the active format.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = format(value).map_err(|_| {
        <S::Error as ser::Error>::custom("date format contains an unsupported specifier")
    })?;
    serializer.serialize_str(&text)
}

/// Deserialize a timestamp from a string in the active format.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(|e| de::Error::custom(format_args!("invalid date {text:?}: {e}")))
}

/// The same as the parent module, for optional fields.
pub mod option {
    use super::*;

    /// Serialize `Some` as a formatted string and `None` as null.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize null as `None` and a string as a timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| {
                parse(&text)
                    .map_err(|e| de::Error::custom(format_args!("invalid date {text:?}: {e}")))
            })
            .transpose()
    }
}
