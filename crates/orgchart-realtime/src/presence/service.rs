//! Presence tracking against a chat homeserver.
//!
//! `MatrixService` owns three pieces of state:
//!
//! - the client handle (absent when the homeserver is not configured or the
//!   client could not be built)
//! - the set of tracked homeserver user ids and the last status seen for each
//! - the poller task, which sweeps every tracked user on a fixed interval and
//!   broadcasts a [`PresenceChangeEvent`] whenever a status differs from the cache
//!
//! Presence failures never propagate: lookups degrade to the cached status or
//! `unavailable`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use futures::future::join_all;
use orgchart_common::MatrixConfig;
use orgchart_core::OnlineStatus;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::Instrument;

use super::client::{matrix_client_factory, ClientFactory, PresenceClient};

/// Default interval between presence sweeps
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Buffered presence changes per listener before it starts lagging
const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// A tracked user's status differs from the last one observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceChangeEvent {
    pub user_id: String,
    pub status: OnlineStatus,
}

struct Poller {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

struct Inner {
    config: MatrixConfig,
    poll_interval: Duration,
    factory: ClientFactory,
    client: RwLock<Option<Arc<dyn PresenceClient>>>,
    /// Tracked user -> generation it was tracked under
    tracked: RwLock<HashMap<String, u64>>,
    next_generation: AtomicU64,
    cache: DashMap<String, OnlineStatus>,
    poller: Mutex<Option<Poller>>,
    changes: broadcast::Sender<PresenceChangeEvent>,
}

/// Presence adapter, cache, and poller for one homeserver
#[derive(Clone)]
pub struct MatrixService {
    inner: Arc<Inner>,
}

impl MatrixService {
    /// Create a service that talks to the homeserver over HTTP
    pub fn new(config: MatrixConfig, poll_interval: Duration) -> Self {
        Self::with_client_factory(config, poll_interval, matrix_client_factory())
    }

    /// Create a service whose client is built by `factory` on [`initialize`](Self::initialize)
    pub fn with_client_factory(
        config: MatrixConfig,
        poll_interval: Duration,
        factory: ClientFactory,
    ) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                config,
                poll_interval,
                factory,
                client: RwLock::new(None),
                tracked: RwLock::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
                cache: DashMap::new(),
                poller: Mutex::new(None),
                changes,
            }),
        }
    }

    /// Connect to the configured homeserver.
    ///
    /// Missing configuration and client construction failures both leave the
    /// service unconfigured; neither is reported to the caller.
    pub async fn initialize(&self) {
        let Some(homeserver) = self
            .inner
            .config
            .homeserver_url
            .as_deref()
            .filter(|_| self.inner.config.is_configured())
        else {
            tracing::info!("No Matrix homeserver configured, presence will report unavailable");
            return;
        };

        match (self.inner.factory)(&self.inner.config) {
            Ok(client) => {
                *self.inner.client.write() = Some(client);
                tracing::info!(
                    homeserver = %homeserver,
                    bot_user = self.inner.config.user_id.as_deref().unwrap_or_default(),
                    "Connected to Matrix homeserver"
                );
            }
            Err(e) => {
                *self.inner.client.write() = None;
                tracing::error!(homeserver = %homeserver, error = %e, "Failed to initialize Matrix client");
            }
        }
    }

    /// Whether a client is available for lookups
    pub fn is_configured(&self) -> bool {
        self.inner.client.read().is_some()
    }

    fn client(&self) -> Option<Arc<dyn PresenceClient>> {
        self.inner.client.read().clone()
    }

    // =========================================================================
    // Tracking
    // =========================================================================

    /// Start monitoring a homeserver user. Idempotent.
    pub fn track_user(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        let mut tracked = self.inner.tracked.write();
        if !tracked.contains_key(&user_id) {
            let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(user_id = %user_id, "Tracking presence");
            tracked.insert(user_id, generation);
        }
    }

    /// Stop monitoring a user and forget its last known status. Idempotent.
    ///
    /// Results of lookups still in flight for the user are discarded.
    pub fn untrack_user(&self, user_id: &str) {
        let mut tracked = self.inner.tracked.write();
        if tracked.remove(user_id).is_some() {
            tracing::debug!(user_id = %user_id, "Untracked presence");
        }
        // Under the tracked lock so a sweep cannot commit in between
        self.inner.cache.remove(user_id);
    }

    pub fn is_tracked(&self, user_id: &str) -> bool {
        self.inner.tracked.read().contains_key(user_id)
    }

    /// Snapshot of the tracked set
    pub fn tracked_users(&self) -> Vec<String> {
        self.inner.tracked.read().keys().cloned().collect()
    }

    /// Last successfully fetched status, if any
    pub fn cached_presence(&self, user_id: &str) -> Option<OnlineStatus> {
        self.inner.cache.get(user_id).map(|entry| *entry)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Current presence of a homeserver user.
    ///
    /// A successful lookup refreshes the cache. A failed one is logged and
    /// answered from the cache, or `unavailable` when nothing is cached.
    pub async fn get_presence(&self, user_id: &str) -> OnlineStatus {
        let Some(client) = self.client() else {
            return OnlineStatus::Unavailable;
        };

        match fetch_presence(client.as_ref(), user_id).await {
            Some(status) => {
                self.inner.cache.insert(user_id.to_string(), status);
                status
            }
            None => self.cached_presence(user_id).unwrap_or_default(),
        }
    }

    /// Current presence of a homeserver user, leaving the cache untouched.
    ///
    /// Falls back like [`get_presence`](Self::get_presence). Change detection
    /// only ever sees statuses the poller fetched itself.
    pub async fn lookup_presence(&self, user_id: &str) -> OnlineStatus {
        let Some(client) = self.client() else {
            return OnlineStatus::Unavailable;
        };

        match fetch_presence(client.as_ref(), user_id).await {
            Some(status) => status,
            None => self.cached_presence(user_id).unwrap_or_default(),
        }
    }

    // =========================================================================
    // Change notifications
    // =========================================================================

    /// Receive every presence change detected from now on
    pub fn subscribe_presence_changes(&self) -> broadcast::Receiver<PresenceChangeEvent> {
        self.inner.changes.subscribe()
    }

    /// Check every tracked user once and broadcast the ones whose status changed.
    ///
    /// Users are checked concurrently. The tracked set is snapshotted first, so
    /// users tracked mid-sweep wait for the next one. A user untracked while
    /// its lookup is in flight is skipped, even if tracked again meanwhile.
    pub async fn poll_all_presences(&self) {
        let users: Vec<(String, u64)> = self
            .inner
            .tracked
            .read()
            .iter()
            .map(|(user_id, generation)| (user_id.clone(), *generation))
            .collect();
        if users.is_empty() {
            return;
        }
        tracing::trace!(count = users.len(), "Sweeping presence");

        join_all(
            users
                .iter()
                .map(|(user_id, generation)| self.check_user(user_id, *generation)),
        )
        .await;
    }

    async fn check_user(&self, user_id: &str, generation: u64) {
        let fetched = match self.client() {
            Some(client) => fetch_presence(client.as_ref(), user_id).await,
            None => None,
        };

        let tracked = self.inner.tracked.read();
        if tracked.get(user_id) != Some(&generation) {
            tracing::debug!(user_id = %user_id, "Discarding presence for untracked user");
            return;
        }
        // Swap and compare in one step so concurrent checks report a change once
        let (previous, current) = match fetched {
            Some(status) => (self.inner.cache.insert(user_id.to_string(), status), status),
            None => {
                let cached = self.cached_presence(user_id);
                (cached, cached.unwrap_or_default())
            }
        };
        drop(tracked);

        if previous != Some(current) {
            tracing::debug!(user_id = %user_id, ?previous, status = %current, "Presence changed");
            // No listeners is fine
            let _ = self.inner.changes.send(PresenceChangeEvent {
                user_id: user_id.to_string(),
                status: current,
            });
        }
    }

    // =========================================================================
    // Polling
    // =========================================================================

    /// Begin sweeping on a fixed interval, starting with an immediate sweep.
    ///
    /// Does nothing when already polling or when no client is available.
    pub fn start_presence_polling(&self) {
        if !self.is_configured() {
            tracing::info!("Skipping presence polling, no Matrix client");
            return;
        }

        let mut poller = self.inner.poller.lock();
        if poller.is_some() {
            return;
        }

        tracing::info!(
            interval_secs = self.inner.poll_interval.as_secs(),
            "Starting presence polling"
        );

        let (stop, stop_rx) = watch::channel(false);
        let task = tokio::spawn(
            poll_loop(Arc::downgrade(&self.inner), self.inner.poll_interval, stop_rx)
                .in_current_span(),
        );
        *poller = Some(Poller { stop, task });
    }

    /// Stop scheduling sweeps. A sweep already in flight runs to completion.
    pub fn stop_presence_polling(&self) {
        let Some(poller) = self.inner.poller.lock().take() else {
            return;
        };
        let _ = poller.stop.send(true);
        // Detached: the loop exits on the stop signal, in-flight sweeps finish
        drop(poller.task);
        tracing::info!("Stopped presence polling");
    }

    pub fn is_polling(&self) -> bool {
        self.inner.poller.lock().is_some()
    }
}

/// `None` when the lookup failed
async fn fetch_presence(client: &dyn PresenceClient, user_id: &str) -> Option<OnlineStatus> {
    match client.get_presence(user_id).await {
        Ok(response) => Some(OnlineStatus::from_presence(response.presence.as_deref())),
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Failed to get presence");
            None
        }
    }
}

/// Ticks until stopped or until the service is dropped.
///
/// Sweeps run on their own task so a slow homeserver never delays the timer.
/// A tick that lands while the previous sweep is still running is skipped.
async fn poll_loop(service: Weak<Inner>, period: Duration, mut stop: watch::Receiver<bool>) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut sweep: Option<JoinHandle<()>> = None;

    loop {
        tokio::select! {
            biased;
            _ = stop.changed() => break,
            // The first tick completes immediately
            _ = ticker.tick() => {
                if sweep.as_ref().is_some_and(|running| !running.is_finished()) {
                    tracing::warn!("Previous presence sweep still running, skipping tick");
                    continue;
                }
                let Some(inner) = service.upgrade() else { break };
                let service = MatrixService { inner };
                sweep = Some(tokio::spawn(
                    async move { service.poll_all_presences().await }.in_current_span(),
                ));
            }
        }
    }
    tracing::debug!("Presence poll loop exited");
}

impl std::fmt::Debug for MatrixService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixService")
            .field("configured", &self.is_configured())
            .field("tracked", &self.inner.tracked.read().len())
            .field("polling", &self.is_polling())
            .finish()
    }
}
