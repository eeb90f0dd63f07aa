//! Scoped session store holding the current identity snapshot

use super::clock::{Clock, SystemClock};
use super::provider::IdentityProvider;
use crate::auth::rbac::{CurrentUserIdentity, IdentitySource, Role};
use crate::config::RbacConfig;
use crate::utils::error::Result;
use crate::utils::logging::AuthzLogger;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Handle returned by [`SessionStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(&CurrentUserIdentity) + Send + Sync>;

#[derive(Debug, Default)]
struct FetchState {
    /// Tag of the most recently started fetch
    generation: u64,
    /// Revision of the installed snapshot
    revision: u64,
    /// Clock reading of the last successful fetch
    fetched_at: Option<Instant>,
    invalidated: bool,
}

/// Identity cache with an injected clock, a staleness window and explicit
/// invalidation.
///
/// Only the most recently started fetch may install its result; anything it
/// supersedes is discarded when it resolves. Readers never block on a fetch.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    snapshot: ArcSwap<CurrentUserIdentity>,
    state: Mutex<FetchState>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn IdentityProvider>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            provider,
            clock,
            ttl,
            snapshot: ArcSwap::from_pointee(CurrentUserIdentity::loading()),
            state: Mutex::new(FetchState::default()),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Store on the system clock with the configured staleness window
    pub fn from_config(provider: Arc<dyn IdentityProvider>, config: &RbacConfig) -> Self {
        Self::new(provider, Arc::new(SystemClock), config.session_ttl())
    }

    /// Current snapshot; never blocks
    pub fn snapshot(&self) -> Arc<CurrentUserIdentity> {
        self.snapshot.load_full()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True when no fetch has succeeded yet, the data was invalidated, or the
    /// staleness window has elapsed
    pub fn is_stale(&self) -> bool {
        let state = self.state.lock();
        match state.fetched_at {
            None => true,
            Some(_) if state.invalidated => true,
            Some(fetched_at) => self.clock.now().saturating_duration_since(fetched_at) >= self.ttl,
        }
    }

    /// Fetch the identity and install it.
    ///
    /// Returns `Ok(true)` when the result was installed and `Ok(false)` when a
    /// newer fetch or a sign-out superseded it. A failed fetch installs a
    /// fail-closed snapshot (no role, no permissions) and returns the error;
    /// retrying is up to the caller.
    pub async fn refresh(&self) -> Result<bool> {
        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.generation
        };
        debug!("Starting identity fetch (generation {})", generation);

        let outcome = self.provider.fetch_identity().await;

        let installed = {
            let mut state = self.state.lock();
            if state.generation != generation {
                debug!(
                    "Discarding identity fetch {} superseded by {}",
                    generation, state.generation
                );
                return Ok(false);
            }

            state.revision += 1;
            let identity = match &outcome {
                Ok(payload) => {
                    state.fetched_at = Some(self.clock.now());
                    state.invalidated = false;
                    payload.clone().into_identity()
                }
                Err(e) => {
                    AuthzLogger::log_fetch_failure(&e.to_string());
                    state.fetched_at = None;
                    CurrentUserIdentity::failed(e.to_string())
                }
            }
            .with_revision(state.revision);

            let identity = Arc::new(identity);
            self.snapshot.store(Arc::clone(&identity));
            identity
        };

        AuthzLogger::log_session_event(
            if outcome.is_ok() { "fetched" } else { "fetch_failed" },
            installed.revision,
            installed.role.map(Role::as_str),
        );
        self.notify(&installed);

        outcome.map(|_| true)
    }

    /// Refresh only when [`is_stale`](Self::is_stale); returns whether a
    /// fetch result was installed
    pub async fn ensure_fresh(&self) -> Result<bool> {
        if self.is_stale() {
            self.refresh().await
        } else {
            Ok(false)
        }
    }

    /// Mark the data stale; the snapshot keeps answering until the next fetch
    pub fn invalidate(&self) {
        self.state.lock().invalidated = true;
        debug!("Session identity invalidated");
    }

    /// Drop the identity and supersede any in-flight fetch
    pub fn sign_out(&self) {
        let cleared = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.revision += 1;
            state.fetched_at = None;
            state.invalidated = false;
            let cleared = Arc::new(CurrentUserIdentity::loading().with_revision(state.revision));
            self.snapshot.store(Arc::clone(&cleared));
            cleared
        };
        AuthzLogger::log_session_event("signed_out", cleared.revision, None);
        self.notify(&cleared);
    }

    /// Observe every installed snapshot
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CurrentUserIdentity) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    fn notify(&self, identity: &CurrentUserIdentity) {
        // Callbacks may subscribe or unsubscribe, so run them unlocked
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in subscribers {
            callback(identity);
        }
    }
}

impl IdentitySource for SessionStore {
    fn current_identity(&self) -> Arc<CurrentUserIdentity> {
        self.snapshot()
    }
}
