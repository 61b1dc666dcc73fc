//! Point-in-time response snapshots.

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use offline_core::Response;
use serde::{Deserialize, Serialize};

/// A captured response stored in a cache namespace.
///
/// A snapshot is never mutated in place. A refetch replaces the entry
/// wholesale, so overlapping writes for the same identity are
/// last-write-wins by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Header name/value pairs as captured.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// Capture time, seconds since the Unix epoch.
    pub stored_at: u64,
}

impl CachedResponse {
    /// Capture a snapshot of a response.
    pub fn snapshot(response: &Response) -> Self {
        let headers = response
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        Self {
            status: response.status.as_u16(),
            headers,
            body: response.body.clone(),
            stored_at: current_timestamp(),
        }
    }

    /// Rebuild a response from the snapshot.
    pub fn to_response(&self) -> Response {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) =
                (name.parse::<HeaderName>(), HeaderValue::from_str(value))
            {
                headers.append(name, value);
            }
        }
        Response {
            status: StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK),
            headers,
            body: self.body.clone(),
        }
    }

    /// Whether the captured status was a success.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Age of the snapshot in seconds.
    pub fn age(&self) -> u64 {
        current_timestamp().saturating_sub(self.stored_at)
    }
}

fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_roundtrip() {
        let original = Response::ok("<html></html>").with_header(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/html"),
        );

        let snapshot = CachedResponse::snapshot(&original);
        let rebuilt = snapshot.to_response();

        assert_eq!(rebuilt.status, StatusCode::OK);
        assert_eq!(rebuilt.body, original.body);
        assert_eq!(
            rebuilt.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut original = Response::ok("first");
        let snapshot = CachedResponse::snapshot(&original);
        original.body = b"second".to_vec();
        assert_eq!(snapshot.body, b"first");
    }

    #[test]
    fn test_is_ok() {
        assert!(CachedResponse::snapshot(&Response::ok("")).is_ok());
        let not_found = Response::new(StatusCode::NOT_FOUND, "");
        assert!(!CachedResponse::snapshot(&not_found).is_ok());
    }

    #[test]
    fn test_stored_at_is_set() {
        let snapshot = CachedResponse::snapshot(&Response::ok(""));
        assert!(snapshot.stored_at > 0);
        assert!(snapshot.age() < 5);
    }
}
