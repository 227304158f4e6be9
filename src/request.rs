//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Method, Uri};

/// An incoming HTTP request.
///
/// The server collects the full body before dispatch, so `body()` is plain
/// bytes — no streaming, no async reads inside handlers. Route parameters
/// are filled in by the [`Router`](crate::Router) when it matches a path.
pub struct Request {
    pub(crate) parts: Parts,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(parts: Parts, body: Bytes) -> Self {
        Self { parts, body, params: HashMap::new() }
    }

    /// Builds a request out of thin air, for exercising handlers and
    /// middleware without a socket:
    ///
    /// ```rust
    /// use weave::{Method, Request};
    ///
    /// let req = Request::synthetic(Method::GET, "/users/42")
    ///     .with_header("x-api-key", "hunter2");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid URI.
    pub fn synthetic(method: Method, path: &str) -> Self {
        let (parts, ()) = http::Request::builder()
            .method(method)
            .uri(path)
            .body(())
            .expect("invalid synthetic request")
            .into_parts();
        Self::new(parts, Bytes::new())
    }

    /// Replaces the body. Panics never; any bytes are valid.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a header.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `value` is not a valid header name/value.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.parts.headers.insert(
            name.parse::<http::header::HeaderName>().expect("invalid header name"),
            value.parse::<http::header::HeaderValue>().expect("invalid header value"),
        );
        self
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Case-insensitive header lookup. Returns `None` for headers whose
    /// value is not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name)?.to_str().ok()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns
    /// `Some("42")`. Empty until a router has matched the request.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_request_carries_method_and_path() {
        let req = Request::synthetic(Method::POST, "/users?limit=5");
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.path(), "/users");
        assert_eq!(req.uri().query(), Some("limit=5"));
        assert!(req.body().is_empty());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = Request::synthetic(Method::GET, "/").with_header("X-Request-Id", "abc");
        assert_eq!(req.header("x-request-id"), Some("abc"));
        assert_eq!(req.header("X-REQUEST-ID"), Some("abc"));
        assert_eq!(req.header("missing"), None);
    }

    #[test]
    fn with_body_replaces_body() {
        let req = Request::synthetic(Method::PUT, "/blob").with_body(&b"raw"[..]);
        assert_eq!(req.body(), b"raw");
    }
}
