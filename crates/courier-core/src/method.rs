//! HTTP methods and their semantic flags.
//!
//! The flags are advisory: nothing in the pipeline refuses a request because
//! of them, but transports consult them to pick a parameter encoding.

use std::fmt;
use std::str::FromStr;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
    /// `CONNECT`
    Connect,
}

impl HttpMethod {
    /// Every method, in declaration order.
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
        HttpMethod::Connect,
    ];

    /// The method token as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
        }
    }

    /// Safe methods do not modify server state (GET, HEAD, OPTIONS).
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }

    /// Repeating an idempotent method has the same effect as sending it once.
    pub fn is_idempotent(&self) -> bool {
        match self {
            Self::Get | Self::Put | Self::Delete | Self::Head | Self::Options | Self::Trace => {
                true
            }
            Self::Post | Self::Patch | Self::Connect => false,
        }
    }

    /// Methods whose responses are cacheable by default.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }

    /// Methods used to change state on the server (POST, PUT, PATCH, DELETE).
    pub fn modifies_state(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the nine supported methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == upper)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Trace => http::Method::TRACE,
            HttpMethod::Connect => http::Method::CONNECT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(HttpMethod::Get, true, true, true, false)]
    #[case(HttpMethod::Post, false, false, false, true)]
    #[case(HttpMethod::Put, false, true, false, true)]
    #[case(HttpMethod::Delete, false, true, false, true)]
    #[case(HttpMethod::Patch, false, false, false, true)]
    #[case(HttpMethod::Head, true, true, true, false)]
    #[case(HttpMethod::Options, true, true, true, false)]
    #[case(HttpMethod::Trace, false, true, false, false)]
    #[case(HttpMethod::Connect, false, false, false, false)]
    fn test_method_flags(
        #[case] method: HttpMethod,
        #[case] safe: bool,
        #[case] idempotent: bool,
        #[case] cacheable: bool,
        #[case] modifies_state: bool,
    ) {
        assert_eq!(method.is_safe(), safe, "{method} safe");
        assert_eq!(method.is_idempotent(), idempotent, "{method} idempotent");
        assert_eq!(method.is_cacheable(), cacheable, "{method} cacheable");
        assert_eq!(method.modifies_state(), modifies_state, "{method} modifies state");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!(
            "BREW".parse::<HttpMethod>().unwrap_err(),
            UnknownMethod("BREW".to_string())
        );
    }

    #[test]
    fn test_display_matches_wire_token() {
        for method in HttpMethod::ALL {
            assert_eq!(method.to_string(), method.as_str());
            assert_eq!(http::Method::from(method).as_str(), method.as_str());
        }
    }
}
