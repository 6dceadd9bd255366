//! File-backed session store
//!
//! Persists the session triple as a small JSON document. I/O failures
//! degrade to absent reads and no-op writes so the client stays usable when
//! the storage location is missing or read-only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{SessionKey, SessionStore};

/// Session store backed by a JSON file
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles against the file.
    io_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Create a store persisting to `path`. The file is created on first
    /// write; a missing parent directory is created as well.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), io_lock: Mutex::new(()) }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> BTreeMap<String, String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "session file is corrupt, treating as empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read session file");
                BTreeMap::new()
            }
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!(path = %self.path.display(), error = %e, "failed to create session directory");
                return;
            }
        }

        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to serialize session entries");
                return;
            }
        };

        // Write via a sibling temp file so a crash never leaves a torn
        // session document.
        let tmp = self.path.with_extension("tmp");
        if let Err(e) = tokio::fs::write(&tmp, serialized).await {
            warn!(path = %tmp.display(), error = %e, "failed to write session file");
            return;
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            warn!(path = %self.path.display(), error = %e, "failed to replace session file");
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: SessionKey) -> Option<String> {
        let _guard = self.io_lock.lock().await;
        self.read_entries().await.get(key.name()).cloned()
    }

    async fn set(&self, access_token: &str, refresh_token: &str, user: &str) {
        let _guard = self.io_lock.lock().await;
        let mut entries = BTreeMap::new();
        entries.insert(SessionKey::AccessToken.name().to_string(), access_token.to_string());
        entries.insert(SessionKey::RefreshToken.name().to_string(), refresh_token.to_string());
        entries.insert(SessionKey::User.name().to_string(), user.to_string());
        self.write_entries(&entries).await;
        debug!(path = %self.path.display(), "session persisted");
    }

    async fn clear(&self) {
        let _guard = self.io_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => debug!(path = %self.path.display(), "session cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to clear session file"),
        }
    }
}
