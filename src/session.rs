//! Server-side session store.
//!
//! Sessions live in memory, keyed by a random token that travels to the
//! client inside a signed cookie. The store associates each token with at
//! most one user id; sessions end on logout or when the TTL runs out.

use std::collections::HashMap;
use std::sync::RwLock;

use time::{Duration, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

/// Default session duration (24 hours).
pub const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl Session {
    fn new(user_id: i64, ttl: Duration) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            token: Uuid::new_v4().to_string(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() >= self.expires_at
    }
}

pub struct SessionStore {
    inner: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_SESSION_TTL_SECS))
    }
}

impl SessionStore {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a session for a user and return it. A user may hold several
    /// sessions at once (multiple browsers).
    pub fn create(&self, user_id: i64) -> Session {
        let session = Session::new(user_id, self.ttl);
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        sessions.insert(session.token.clone(), session.clone());
        info!(user_id, "session created");
        session
    }

    /// Look up a live session. Expired sessions are evicted on access.
    pub fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        match sessions.get(token) {
            Some(s) if s.is_expired() => {
                debug!(user_id = s.user_id, "session expired");
                sessions.remove(token);
                None
            }
            Some(s) => Some(s.clone()),
            None => None,
        }
    }

    /// Destroy a session. A no-op when the token is unknown, so logout is
    /// idempotent.
    pub fn destroy(&self, token: &str) {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        if let Some(s) = sessions.remove(token) {
            info!(user_id = s.user_id, "session destroyed");
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("session store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_get_roundtrip() {
        let store = SessionStore::default();
        let session = store.create(42);
        let found = store.get(&session.token).expect("session should exist");
        assert_eq!(found.user_id, 42);
        assert_eq!(found.token, session.token);
    }

    #[test]
    fn unknown_token_is_none() {
        let store = SessionStore::default();
        assert!(store.get("no-such-token").is_none());
    }

    #[test]
    fn destroy_removes_session_and_is_idempotent() {
        let store = SessionStore::default();
        let session = store.create(7);
        store.destroy(&session.token);
        assert!(store.get(&session.token).is_none());
        // Second destroy of the same token must not panic or error.
        store.destroy(&session.token);
        assert!(store.is_empty());
    }

    #[test]
    fn expired_session_is_evicted_on_access() {
        let store = SessionStore::with_ttl(Duration::seconds(-1));
        let session = store.create(1);
        assert!(store.get(&session.token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn tokens_are_unique_per_session() {
        let store = SessionStore::default();
        let a = store.create(1);
        let b = store.create(1);
        assert_ne!(a.token, b.token);
        assert_eq!(store.len(), 2);
    }
}
