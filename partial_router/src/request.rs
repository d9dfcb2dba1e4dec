//! Request description shared by the browser fetcher and its test doubles.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// HTTP method of a partial request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum Method {
    Get,
    Head,
    Options,
    Trace,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Upper-case method name as sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// GET, HEAD, OPTIONS and TRACE never need CSRF protection
    pub fn is_safe(self) -> bool {
        matches!(
            self,
            Method::Get | Method::Head | Method::Options | Method::Trace
        )
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `url`, resolved against `origin`, lands on that same origin.
///
/// Comparison uses the parsed origin tuple, so scheme and host case and an
/// explicit default port do not matter. An unparsable `origin` matches nothing.
pub fn is_same_origin(url: &str, origin: &str) -> bool {
    let Ok(base) = Url::parse(origin) else {
        return false;
    };

    base.join(url.trim())
        .is_ok_and(|resolved| resolved.origin() == base.origin())
}

/// Whether a request must carry the CSRF header
pub fn needs_csrf(method: Method, url: &str, origin: &str) -> bool {
    !method.is_safe() && is_same_origin(url, origin)
}

/// An outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Request method
    pub method: Method,
    /// Target URL, relative or absolute
    pub url: String,
    /// Header name/value pairs in insertion order
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    /// A request without headers
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of header `name`, compared case-insensitively
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully read response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Whole response body as text
    pub body: String,
}

impl FetchResponse {
    /// A response with `status` and `body`
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
