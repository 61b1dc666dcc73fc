//! Cache store abstraction.

use std::sync::Arc;

use async_trait::async_trait;
use offline_core::RequestIdentity;

use crate::entry::CachedResponse;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Backend storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// The namespace name is not addressable by this store.
    #[error("invalid namespace name: {0}")]
    InvalidName(String),
}

/// A single named cache namespace.
///
/// Entries map a request identity to a response snapshot. There is no
/// entry-level expiry; reclamation happens only by deleting the whole
/// namespace through the owning [`CacheStore`].
#[async_trait]
pub trait CacheHandle: Send + Sync {
    /// Look up a snapshot by request identity.
    async fn lookup(&self, identity: &RequestIdentity) -> CacheResult<Option<CachedResponse>>;

    /// Store a snapshot, replacing any existing entry for the identity.
    async fn put(&self, identity: RequestIdentity, response: CachedResponse) -> CacheResult<()>;

    /// Identities currently stored in this namespace.
    async fn keys(&self) -> CacheResult<Vec<RequestIdentity>>;
}

/// Named, versioned cache namespaces.
///
/// Decouples the controller from a concrete storage backend; tests and
/// embedders inject [`MemoryStore`](crate::MemoryStore).
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Open a namespace, creating it if absent.
    async fn open(&self, name: &str) -> CacheResult<Arc<dyn CacheHandle>>;

    /// Names of all existing namespaces, oldest first.
    async fn list_names(&self) -> CacheResult<Vec<String>>;

    /// Delete a namespace and all of its entries.
    ///
    /// Returns `true` if the namespace existed.
    async fn delete(&self, name: &str) -> CacheResult<bool>;

    /// Look up a request identity across all namespaces, in namespace
    /// enumeration order.
    async fn match_any(&self, identity: &RequestIdentity) -> CacheResult<Option<CachedResponse>>;
}
