//! Configuration service implementation.
//!
//! Loads the client configuration from the configuration file
//! (~/.config/hms-console/config.toml), creating it with defaults when
//! missing.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::paths::ConsolePaths;

/// Production deployment root, including the `/api/v1` base path.
pub const DEFAULT_BASE_URL: &str = "https://hms-management-system-ae3n.onrender.com/api/v1";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend root every request path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Configuration service that loads and caches the client configuration.
///
/// This implementation reads the configuration from config.toml
/// and caches it to avoid repeated file I/O operations.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<ClientConfig>>>,
    /// Explicit file override, used by tests.
    file: Option<PathBuf>,
}

impl ConfigService {
    /// Creates a new ConfigService over the default config file.
    ///
    /// The configuration is loaded lazily on first access to avoid blocking
    /// during initialization.
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            file: None,
        }
    }

    /// Creates a ConfigService reading from an explicit file path.
    pub fn with_file(path: impl AsRef<Path>) -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            file: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Gets the client configuration, loading from file if not cached.
    ///
    /// Falls back to defaults when the file cannot be read or parsed.
    pub fn get_config(&self) -> ClientConfig {
        // Check if already cached
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|err| {
            tracing::warn!(target: "config", "Falling back to default config: {}", err);
            ClientConfig::default()
        });

        // Cache it
        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    /// Loads ClientConfig from the config file, writing defaults when the
    /// file does not exist yet.
    fn load_config(&self) -> Result<ClientConfig, String> {
        let path = self.config_path()?;

        if !path.exists() {
            let default_config = ClientConfig::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create config dir: {}", e))?;
            }
            let rendered = toml::to_string_pretty(&default_config)
                .map_err(|e| format!("Failed to render default config: {}", e))?;
            std::fs::write(&path, rendered)
                .map_err(|e| format!("Failed to save default config: {}", e))?;
            return Ok(default_config);
        }

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    fn config_path(&self) -> Result<PathBuf, String> {
        match &self.file {
            Some(path) => Ok(path.clone()),
            None => ConsolePaths::config_file().map_err(|e| e.to_string()),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
