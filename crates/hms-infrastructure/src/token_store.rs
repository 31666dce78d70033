//! Token store implementations.
//!
//! The durable store is a single raw-token file under the config
//! directory; the in-memory variant backs tests and ephemeral sessions.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use hms_core::error::{ConsoleError, Result};
use hms_core::session::TokenStore;

use crate::paths::ConsolePaths;

/// File-backed single-slot token store.
///
/// The slot holds the raw token string and nothing else; absence of the
/// file means no token is stored.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store over the default token path.
    pub fn new() -> Result<Self> {
        let path = ConsolePaths::token_file()
            .map_err(|e| ConsoleError::storage(format!("Failed to resolve token path: {}", e)))?;
        Ok(Self { path })
    }

    /// Creates a store over an explicit path (used by tests).
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let token = raw.trim();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory single-slot token store.
#[derive(Default)]
pub struct InMemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.read().unwrap().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.slot.write().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.write().unwrap() = None;
        Ok(())
    }
}
