//! The offline delivery controller.

use std::sync::Arc;

use futures::future::try_join_all;
use offline_cache::{CacheError, CacheHandle, CacheStore, CachedResponse, NamespaceSet};
use offline_core::{
    ConfigError, ControlMessage, ControllerEvent, ControllerPhase, InvalidTransition,
    LifecycleObserver, LifecycleState, NotificationData, PushPayload, Request, RequestIdentity,
    Response, ShellConfig,
};
use offline_router::{FetchError, FetchOutcome, FetchRouter, NetworkClient, RouteError};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::host::{ClientRegistry, NotificationPresenter, UpdateSignal};
use crate::notify::Notification;

/// Errors fatal to a controller event.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// A shell asset could not be fetched; initialization aborts with
    /// no partial static cache.
    #[error("shell precache failed for {path}")]
    Precache {
        /// Asset path that failed.
        path: String,
        #[source]
        source: FetchError,
    },

    /// A shell asset fetched with a non-success status.
    #[error("shell precache got status {status} for {path}")]
    PrecacheStatus {
        /// Asset path that failed.
        path: String,
        /// Status the network returned.
        status: u16,
    },

    /// Illegal lifecycle transition.
    #[error(transparent)]
    Lifecycle(#[from] InvalidTransition),

    /// Cache backend failure.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Routing failure with no fallback.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Outcome of dispatching one controller event.
#[derive(Debug)]
pub enum EventOutcome {
    /// The event completed with nothing to hand back.
    Done,
    /// The intercepted request resolved to this response.
    Response(Response),
    /// The intercepted request is not ours; the host sends it as-is.
    Passthrough,
}

/// The offline delivery controller.
///
/// One instance represents one installed controller version. The host
/// dispatches events into it one at a time; each handler returns a
/// future the host keeps alive until it resolves.
pub struct DeliveryController<S, N> {
    config: ShellConfig,
    names: NamespaceSet,
    store: Arc<S>,
    network: Arc<N>,
    clients: Arc<dyn ClientRegistry>,
    notifications: Arc<dyn NotificationPresenter>,
    router: FetchRouter<S, N>,
    state: Mutex<LifecycleState>,
    observers: Vec<Arc<dyn LifecycleObserver>>,
}

impl<S: CacheStore, N: NetworkClient> DeliveryController<S, N> {
    /// Create a controller for the given deployment.
    pub fn new(
        config: ShellConfig,
        store: Arc<S>,
        network: Arc<N>,
        clients: Arc<dyn ClientRegistry>,
        notifications: Arc<dyn NotificationPresenter>,
    ) -> Result<Self, DeliveryError> {
        let router = FetchRouter::new(store.clone(), network.clone(), &config)?;
        let names = NamespaceSet::for_version(&config.version);
        Ok(Self {
            config,
            names,
            store,
            network,
            clients,
            notifications,
            router,
            state: Mutex::new(LifecycleState::new()),
            observers: Vec::new(),
        })
    }

    /// Register a lifecycle observer.
    pub fn with_observer(mut self, observer: Arc<dyn LifecycleObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> ControllerPhase {
        self.state.lock().await.phase()
    }

    /// Dispatch one host event.
    pub async fn dispatch(&self, event: ControllerEvent) -> Result<EventOutcome, DeliveryError> {
        match event {
            ControllerEvent::Install => {
                self.handle_install().await?;
                Ok(EventOutcome::Done)
            }
            ControllerEvent::Activate => {
                self.handle_activate().await?;
                Ok(EventOutcome::Done)
            }
            ControllerEvent::Fetch(request) => match self.handle_fetch(&request).await? {
                FetchOutcome::Passthrough => Ok(EventOutcome::Passthrough),
                FetchOutcome::Response(response) => Ok(EventOutcome::Response(response)),
            },
            ControllerEvent::Message(message) => {
                self.handle_message(message).await?;
                Ok(EventOutcome::Done)
            }
            ControllerEvent::Push(payload) => {
                self.handle_push(&payload).await;
                Ok(EventOutcome::Done)
            }
            ControllerEvent::NotificationClick(data) => {
                self.handle_notification_click(&data).await;
                Ok(EventOutcome::Done)
            }
        }
    }

    /// Populate the static namespace with the shell asset list.
    ///
    /// All-or-nothing: every asset is fetched before anything is
    /// stored, and a single failure aborts the install with the static
    /// cache untouched.
    pub async fn handle_install(&self) -> Result<(), DeliveryError> {
        let fetches = self
            .config
            .shell_assets
            .iter()
            .map(|path| self.fetch_shell_asset(path));
        let snapshots = try_join_all(fetches).await?;

        let cache = self.store.open(&self.names.static_name().to_string()).await?;
        for (identity, snapshot) in snapshots {
            cache.put(identity, snapshot).await?;
        }
        info!(
            version = %self.config.version,
            assets = self.config.shell_assets.len(),
            "shell cache populated"
        );

        self.advance(ControllerPhase::Waiting).await?;
        // Pages still controlled by the previous version learn that an
        // update is ready.
        if let Err(error) = self.clients.broadcast(UpdateSignal::UpdateAvailable).await {
            warn!(%error, "update broadcast failed");
        }
        Ok(())
    }

    async fn fetch_shell_asset(
        &self,
        path: &str,
    ) -> Result<(RequestIdentity, CachedResponse), DeliveryError> {
        let url = self.config.asset_url(path)?;
        let request = Request::get(url);
        let response =
            self.network
                .fetch(&request)
                .await
                .map_err(|source| DeliveryError::Precache {
                    path: path.to_string(),
                    source,
                })?;
        if !response.is_ok() {
            return Err(DeliveryError::PrecacheStatus {
                path: path.to_string(),
                status: response.status.as_u16(),
            });
        }
        Ok((request.identity(), CachedResponse::snapshot(&response)))
    }

    /// Evict superseded namespaces and claim open contexts.
    pub async fn handle_activate(&self) -> Result<(), DeliveryError> {
        self.advance(ControllerPhase::Activating).await?;
        self.evict_superseded().await?;
        self.advance(ControllerPhase::Active).await?;
        if let Err(error) = self.clients.claim().await {
            warn!(%error, "client claim failed");
        }
        Ok(())
    }

    // Deletes every namespace the current version set does not retain,
    // leaving at most the current static/dynamic pair alive.
    async fn evict_superseded(&self) -> Result<(), DeliveryError> {
        // Opening the current pair first keeps it enumerable even
        // before the first runtime write.
        self.store.open(&self.names.static_name().to_string()).await?;
        self.store.open(&self.names.dynamic_name().to_string()).await?;

        for name in self.store.list_names().await? {
            if self.names.retains(&name) {
                continue;
            }
            match self.store.delete(&name).await {
                Ok(_) => info!(namespace = %name, "evicted superseded cache"),
                Err(error) => warn!(namespace = %name, %error, "cache eviction failed"),
            }
        }
        Ok(())
    }

    /// Route an intercepted request.
    ///
    /// The host delivers fetch events only to the controller in
    /// control; routing itself does not re-check the phase.
    pub async fn handle_fetch(&self, request: &Request) -> Result<FetchOutcome, DeliveryError> {
        Ok(self.router.route(request).await?)
    }

    /// Handle an inbound control message.
    ///
    /// `SKIP_WAITING` activates a waiting controller immediately,
    /// without waiting for old contexts to close. Other message types
    /// are ignored.
    pub async fn handle_message(&self, message: ControlMessage) -> Result<(), DeliveryError> {
        match message {
            ControlMessage::SkipWaiting => {
                if self.phase().await == ControllerPhase::Waiting {
                    info!("skip-waiting received, activating now");
                    self.handle_activate().await
                } else {
                    debug!("skip-waiting ignored outside the waiting phase");
                    Ok(())
                }
            }
            ControlMessage::Unknown => Ok(()),
        }
    }

    /// Present a push delivery as a system notification.
    ///
    /// Malformed payloads degrade to empty notification text rather
    /// than failing the event.
    pub async fn handle_push(&self, raw: &[u8]) {
        let payload = PushPayload::parse(raw);
        let notification = Notification::from_payload(payload);
        debug!(reference = %notification.data.reference, "showing push notification");
        if let Err(error) = self.notifications.show(notification).await {
            warn!(%error, "notification display failed");
        }
    }

    /// Close a clicked notification and open (or focus) a window at
    /// its target URL, defaulting to the site root.
    pub async fn handle_notification_click(&self, data: &NotificationData) {
        if let Err(error) = self.notifications.close(&data.reference).await {
            warn!(reference = %data.reference, %error, "notification close failed");
        }
        let url = data.url.as_deref().unwrap_or_else(|| self.config.scope.as_str());
        if let Err(error) = self.clients.open_window(url).await {
            warn!(url, %error, "window open failed");
        }
    }

    async fn advance(&self, to: ControllerPhase) -> Result<(), DeliveryError> {
        let mut state = self.state.lock().await;
        let phase = state.advance(to)?;
        info!(%phase, "lifecycle transition");
        for observer in &self.observers {
            observer.on_phase(phase);
        }
        Ok(())
    }
}
