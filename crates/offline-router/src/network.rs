//! Outbound network access.

use async_trait::async_trait;
use offline_core::{Request, Response};

/// Error type for network fetches.
///
/// Non-success HTTP statuses are not errors here; the router inspects
/// the returned response and decides whether to cache it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection-level failure (offline, DNS, reset).
    #[error("connection error: {0}")]
    Connection(String),

    /// The request could not be issued at all.
    #[error("request error: {0}")]
    Request(String),
}

/// Live fetch path the router delegates to.
///
/// No timeout is applied at this seam; a hung fetch suspends its
/// request until the host tears the event down.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Issue the request against the live network.
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}
