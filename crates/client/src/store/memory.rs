//! In-memory session store
//!
//! Used when no persistent storage is available, and as the deterministic
//! backend in tests. Data lives only for the lifetime of the process.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Session, SessionKey, SessionStore};

/// Session store backed by process memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Session>,
}

impl MemorySessionStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: SessionKey) -> Option<String> {
        let session = self.session.lock();
        match key {
            SessionKey::AccessToken => session.access_token.clone(),
            SessionKey::RefreshToken => session.refresh_token.clone(),
            SessionKey::User => session.user.clone(),
        }
    }

    async fn set(&self, access_token: &str, refresh_token: &str, user: &str) {
        *self.session.lock() = Session {
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
            user: Some(user.to_string()),
        };
    }

    async fn clear(&self) {
        *self.session.lock() = Session::default();
    }

    async fn snapshot(&self) -> Session {
        self.session.lock().clone()
    }
}
