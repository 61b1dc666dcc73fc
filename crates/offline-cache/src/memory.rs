//! In-memory cache store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use offline_core::RequestIdentity;
use tokio::sync::RwLock;

use crate::entry::CachedResponse;
use crate::store::{CacheHandle, CacheResult, CacheStore};

/// In-memory cache store for tests and embedded use.
///
/// Namespaces are kept in creation order so enumeration (and therefore
/// [`CacheStore::match_any`]) is deterministic.
#[derive(Default)]
pub struct MemoryStore {
    namespaces: RwLock<Vec<(String, Arc<MemoryNamespace>)>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn open(&self, name: &str) -> CacheResult<Arc<dyn CacheHandle>> {
        let mut namespaces = self.namespaces.write().await;
        if let Some((_, namespace)) = namespaces.iter().find(|(n, _)| n == name) {
            let handle: Arc<dyn CacheHandle> = namespace.clone();
            return Ok(handle);
        }
        let namespace = Arc::new(MemoryNamespace::default());
        namespaces.push((name.to_string(), namespace.clone()));
        Ok(namespace)
    }

    async fn list_names(&self) -> CacheResult<Vec<String>> {
        let namespaces = self.namespaces.read().await;
        Ok(namespaces.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn delete(&self, name: &str) -> CacheResult<bool> {
        let mut namespaces = self.namespaces.write().await;
        let before = namespaces.len();
        namespaces.retain(|(n, _)| n != name);
        Ok(namespaces.len() < before)
    }

    async fn match_any(&self, identity: &RequestIdentity) -> CacheResult<Option<CachedResponse>> {
        let namespaces: Vec<Arc<MemoryNamespace>> = {
            let guard = self.namespaces.read().await;
            guard.iter().map(|(_, ns)| ns.clone()).collect()
        };
        for namespace in namespaces {
            if let Some(snapshot) = namespace.lookup(identity).await? {
                return Ok(Some(snapshot));
            }
        }
        Ok(None)
    }
}

/// A single in-memory namespace.
#[derive(Default)]
pub struct MemoryNamespace {
    entries: RwLock<HashMap<RequestIdentity, CachedResponse>>,
}

#[async_trait]
impl CacheHandle for MemoryNamespace {
    async fn lookup(&self, identity: &RequestIdentity) -> CacheResult<Option<CachedResponse>> {
        Ok(self.entries.read().await.get(identity).cloned())
    }

    async fn put(&self, identity: RequestIdentity, response: CachedResponse) -> CacheResult<()> {
        self.entries.write().await.insert(identity, response);
        Ok(())
    }

    async fn keys(&self) -> CacheResult<Vec<RequestIdentity>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}
