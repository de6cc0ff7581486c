//! Application state for the web layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache as MokaCache;

use crate::catalog::FlightCatalog;
use crate::planner::{RouteSession, SearchConfig};

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// TTL for stored sessions.
    pub ttl: Duration,

    /// Maximum number of live sessions.
    pub max_capacity: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            max_capacity: 256,
        }
    }
}

/// Store of completed search sessions, keyed by handle.
///
/// Re-rank requests refer back to a session by its handle, so the store
/// keeps each session's candidate routes alive between requests. A
/// session pins its whole candidate set in memory, so the store is
/// TTL'd and capacity-bounded; a handle whose session has been evicted
/// behaves like one that never existed.
pub struct SessionStore {
    next_id: AtomicU64,
    sessions: MokaCache<u64, RouteSession>,
}

impl SessionStore {
    /// Create a new store with the given configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let sessions = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            next_id: AtomicU64::new(0),
            sessions,
        }
    }

    /// Store a session, returning its handle.
    pub fn insert(&self, session: RouteSession) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.sessions.insert(id, session);
        id
    }

    /// Fetch a session by handle, if it is still live.
    pub fn get(&self, id: u64) -> Option<RouteSession> {
        self.sessions.get(&id)
    }

    /// Number of live sessions (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Flight catalog, loaded once at startup
    pub catalog: Arc<FlightCatalog>,

    /// Planner configuration
    pub config: Arc<SearchConfig>,

    /// Completed search sessions
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Create a new app state with default session bounds.
    pub fn new(catalog: FlightCatalog, config: SearchConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            sessions: Arc::new(SessionStore::new(&SessionConfig::default())),
        }
    }
}
