//! Response model for intercepted fetches.

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// An HTTP response as seen by the controller.
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a response with the given status and body.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Create a 200 OK response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Add a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Whether the status is a success (2xx).
    ///
    /// Every cache write is gated on this.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_constructor() {
        let response = Response::ok("hello");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, b"hello");
        assert!(response.is_ok());
    }

    #[test]
    fn test_is_ok_bounds() {
        assert!(Response::new(StatusCode::NO_CONTENT, "").is_ok());
        assert!(!Response::new(StatusCode::NOT_FOUND, "").is_ok());
        assert!(!Response::new(StatusCode::INTERNAL_SERVER_ERROR, "").is_ok());
        assert!(!Response::new(StatusCode::MOVED_PERMANENTLY, "").is_ok());
    }

    #[test]
    fn test_with_header() {
        let response = Response::ok("body").with_header(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/html"),
        );
        assert_eq!(
            response.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }
}
