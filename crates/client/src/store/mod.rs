//! Session store
//!
//! Persists the session triple: access token, refresh token and the cached
//! user profile. The store is the only owner of this state; the writers are
//! login success, refresh success, logout and refresh failure.
//!
//! The contract is deliberately infallible from the caller's perspective:
//! `get` returns absent on any failure and `set`/`clear` degrade to no-ops,
//! so the client keeps working when no persistent storage is available.

mod file;
mod memory;

use async_trait::async_trait;
use folio_domain::constants::{
    STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN, STORAGE_KEY_USER,
};

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// The three fixed entries a session consists of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    AccessToken,
    RefreshToken,
    User,
}

impl SessionKey {
    /// Storage name of this entry.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AccessToken => STORAGE_KEY_ACCESS_TOKEN,
            Self::RefreshToken => STORAGE_KEY_REFRESH_TOKEN,
            Self::User => STORAGE_KEY_USER,
        }
    }
}

/// Point-in-time copy of the stored session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Serialized `UserProfile` JSON.
    pub user: Option<String>,
}

impl Session {
    /// Whether an access token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Storage seam for the session triple
///
/// Implementations must never fail visibly: missing storage reads as absent
/// and failed writes are logged and swallowed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a single entry; absent when unset or storage is unavailable.
    async fn get(&self, key: SessionKey) -> Option<String>;

    /// Write all three entries together. Called only on successful login or
    /// refresh, so partial sessions never exist.
    async fn set(&self, access_token: &str, refresh_token: &str, user: &str);

    /// Remove all three entries. Idempotent.
    async fn clear(&self);

    /// Read the whole session at once.
    async fn snapshot(&self) -> Session {
        Session {
            access_token: self.get(SessionKey::AccessToken).await,
            refresh_token: self.get(SessionKey::RefreshToken).await,
            user: self.get(SessionKey::User).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_match_storage_contract() {
        assert_eq!(SessionKey::AccessToken.name(), "auth_token");
        assert_eq!(SessionKey::RefreshToken.name(), "refresh_token");
        assert_eq!(SessionKey::User.name(), "user");
    }

    #[test]
    fn empty_session_is_unauthenticated() {
        assert!(!Session::default().is_authenticated());
    }
}
