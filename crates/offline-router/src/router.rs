//! Strategy dispatch for intercepted requests.

use std::sync::Arc;

use offline_cache::{CacheError, CacheHandle, CacheName, CacheStore, CachedResponse, NamespaceSet};
use offline_core::{ConfigError, Request, RequestIdentity, Response, ShellConfig};
use tracing::{debug, warn};

use crate::classify::{classify, ResourceClass};
use crate::network::{FetchError, NetworkClient};
use crate::strategy::{strategy_for, Strategy};

/// Routing errors surfaced to the intercepted request.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Network failed and no cached fallback exists.
    #[error("no network and no cached fallback for {identity}")]
    Unreachable {
        /// Identity of the failed request.
        identity: RequestIdentity,
        #[source]
        source: FetchError,
    },

    /// Cache backend failure during a lookup.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Outcome of routing an intercepted request.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The request is not ours; the host sends it untouched.
    Passthrough,
    /// A resolved response.
    Response(Response),
}

/// Picks and executes exactly one caching strategy per request.
///
/// The response is always resolved before the request completes; there
/// are no silent drops.
pub struct FetchRouter<S, N> {
    store: Arc<S>,
    network: Arc<N>,
    names: NamespaceSet,
    origin: url::Origin,
    offline_fallback: RequestIdentity,
}

impl<S: CacheStore, N: NetworkClient> FetchRouter<S, N> {
    /// Create a router for the given deployment.
    pub fn new(store: Arc<S>, network: Arc<N>, config: &ShellConfig) -> Result<Self, ConfigError> {
        let fallback_url = config.asset_url(&config.offline_fallback)?;
        Ok(Self {
            store,
            network,
            names: NamespaceSet::for_version(&config.version),
            origin: config.origin(),
            offline_fallback: RequestIdentity::for_url(&fallback_url),
        })
    }

    /// Route one intercepted request.
    ///
    /// Mutating methods and cross-origin requests pass through without
    /// any cache read or write.
    pub async fn route(&self, request: &Request) -> Result<FetchOutcome, RouteError> {
        if !request.is_retrieval() || !request.same_origin(&self.origin) {
            debug!(url = %request.url, "passthrough");
            return Ok(FetchOutcome::Passthrough);
        }

        let class = classify(request);
        let response = match strategy_for(class) {
            Strategy::NetworkFirst => self.network_first(request, class).await?,
            Strategy::CacheFirst => self.cache_first(request).await?,
        };
        Ok(FetchOutcome::Response(response))
    }

    /// Live fetch with cache fallback. Successful responses are written
    /// through into the dynamic namespace; documents additionally fall
    /// back to the cached offline document when everything else fails.
    async fn network_first(
        &self,
        request: &Request,
        class: ResourceClass,
    ) -> Result<Response, RouteError> {
        let identity = request.identity();
        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_ok() {
                    self.write_through(self.names.dynamic_name(), &identity, &response)
                        .await;
                }
                Ok(response)
            }
            Err(source) => {
                debug!(identity = %identity, error = %source, "network failed, falling back to cache");
                if let Some(snapshot) = self.store.match_any(&identity).await? {
                    return Ok(snapshot.to_response());
                }
                if class == ResourceClass::Document {
                    if let Some(snapshot) = self.store.match_any(&self.offline_fallback).await? {
                        debug!(identity = %identity, "serving offline fallback document");
                        return Ok(snapshot.to_response());
                    }
                }
                Err(RouteError::Unreachable { identity, source })
            }
        }
    }

    /// Cached snapshot if present, skipping the network entirely;
    /// otherwise fetch and populate the static namespace.
    async fn cache_first(&self, request: &Request) -> Result<Response, RouteError> {
        let identity = request.identity();
        if let Some(snapshot) = self.store.match_any(&identity).await? {
            debug!(identity = %identity, "cache hit");
            return Ok(snapshot.to_response());
        }

        let response = self
            .network
            .fetch(request)
            .await
            .map_err(|source| RouteError::Unreachable {
                identity: identity.clone(),
                source,
            })?;
        if response.is_ok() {
            self.write_through(self.names.static_name(), &identity, &response)
                .await;
        }
        Ok(response)
    }

    // Best-effort: the original response is returned to the caller
    // whether or not the duplicate lands in the cache.
    async fn write_through(&self, name: &CacheName, identity: &RequestIdentity, response: &Response) {
        let snapshot = CachedResponse::snapshot(response);
        let result = async {
            let cache = self.store.open(&name.to_string()).await?;
            cache.put(identity.clone(), snapshot).await
        }
        .await;
        if let Err(error) = result {
            warn!(namespace = %name, identity = %identity, %error, "cache write failed");
        }
    }
}
