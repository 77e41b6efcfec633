//! Bearer-token store.
//!
//! Process-wide authentication state with explicit lifecycle points: read
//! from disk once at startup, updated on login, cleared on logout. The
//! store is injected into the REST client rather than read ad hoc, and a
//! missing token is tolerated — requests simply go out unauthenticated and
//! the server rejects them.

use parking_lot::RwLock;
use std::path::PathBuf;
use tracing::{debug, warn};

use folio_core::error::ConfigError;

/// Shared bearer-token state, optionally persisted to a file.
#[derive(Debug)]
pub struct TokenStore {
    path: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl TokenStore {
    /// Creates a store with no backing file (token lives only in memory).
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            token: RwLock::new(None),
        }
    }

    /// Creates a store backed by `path`, reading any previously persisted
    /// token.
    ///
    /// An unreadable or absent file yields an unauthenticated store; that
    /// is the normal first-run state, not an error.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    debug!(path = %path.display(), "Loaded bearer token");
                    Some(trimmed.to_string())
                }
            }
            Err(_) => None,
        };
        Self {
            path: Some(path),
            token: RwLock::new(token),
        }
    }

    /// Returns the current token, if any.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Returns true if a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Sets the token and persists it when the store is file-backed.
    pub fn set(&self, token: impl Into<String>) -> Result<(), ConfigError> {
        let token = token.into();
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    })?;
                }
            }
            std::fs::write(path, &token).map_err(|e| ConfigError::FileWrite {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        *self.token.write() = Some(token);
        Ok(())
    }

    /// Clears the token and removes the backing file when present.
    pub fn clear(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!(path = %path.display(), error = %e, "Failed to remove token file");
                    return Err(ConfigError::FileWrite {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        *self.token.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_lifecycle() {
        let store = TokenStore::in_memory();
        assert!(!store.is_authenticated());
        store.set("abc123").unwrap();
        assert_eq!(store.current().as_deref(), Some("abc123"));
        store.clear().unwrap();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_missing_file_is_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::load(dir.path().join("token"));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_persists_and_reload_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth").join("token");

        let store = TokenStore::load(&path);
        store.set("persisted-token").unwrap();

        let reloaded = TokenStore::load(&path);
        assert_eq!(reloaded.current().as_deref(), Some("persisted-token"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");

        let store = TokenStore::load(&path);
        store.set("t").unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(TokenStore::load(&path).current().is_none());
    }

    #[test]
    fn test_whitespace_only_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();
        assert!(!TokenStore::load(&path).is_authenticated());
    }
}
