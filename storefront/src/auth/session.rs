//! Admin session storage
//!
//! A session is `{username, created_at}` keyed by an opaque bearer token.
//! Expiry is enforced in two places: lazily on lookup, and by the hourly
//! sweep the server registers as a periodic background task. The sweep is
//! owned by the store (callers just invoke [`SessionStore::purge_expired`]),
//! not ad hoc timer state.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use shared::util::now_millis;

/// One live admin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    /// Unix millis
    pub created_at: i64,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            created_at: now_millis(),
        }
    }
}

/// Key-value session storage seam.
///
/// The server holds `Arc<dyn SessionStore>`; handlers and middleware never
/// see the backing structure.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session under `token`, replacing any previous holder.
    async fn insert(&self, token: String, session: Session);

    /// Fetch the session for `token`, if present and unexpired.
    async fn get(&self, token: &str) -> Option<Session>;

    /// Drop a session. Returns whether the token existed.
    async fn remove(&self, token: &str) -> bool;

    /// Drop every expired session, returning how many were removed.
    async fn purge_expired(&self) -> usize;

    /// Session lifetime in milliseconds (for computing `expires_at`).
    fn ttl_millis(&self) -> i64;
}

/// In-memory session store over a lock-free map.
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Store with the default 24-hour session lifetime.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60))
    }

    fn is_expired(&self, session: &Session) -> bool {
        now_millis() - session.created_at >= self.ttl.as_millis() as i64
    }

    /// Number of stored sessions, expired ones included (test helper).
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, token: String, session: Session) {
        self.sessions.insert(token, session);
    }

    async fn get(&self, token: &str) -> Option<Session> {
        let expired = match self.sessions.get(token) {
            Some(entry) => {
                if self.is_expired(&entry) {
                    true
                } else {
                    return Some(entry.clone());
                }
            }
            None => return None,
        };
        if expired {
            self.sessions.remove(token);
        }
        None
    }

    async fn remove(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    async fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| {
            now_millis() - session.created_at < self.ttl.as_millis() as i64
        });
        before - self.sessions.len()
    }

    fn ttl_millis(&self) -> i64 {
        self.ttl.as_millis() as i64
    }
}
