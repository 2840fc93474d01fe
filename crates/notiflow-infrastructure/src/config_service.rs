//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the client configuration
//! from the configuration file (~/.config/notiflow/config.toml).

use crate::paths::NotiflowPaths;
use notiflow_core::config::ClientConfig;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::warn;

/// Environment variable that overrides the configured API base URL.
pub const API_URL_ENV: &str = "NOTIFLOW_API_URL";

/// Configuration service that loads and caches the client configuration.
///
/// This implementation reads the configuration from config.toml and caches
/// it to avoid repeated file I/O operations. A missing file yields the
/// default configuration; a malformed file is logged and also falls back to
/// defaults rather than failing startup.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit file path; `None` resolves the default location lazily.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService reading from the default location.
    ///
    /// The configuration is loaded lazily on first access to avoid blocking
    /// during initialization.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading from a custom path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the client configuration, loading from file if not cached.
    ///
    /// The `NOTIFLOW_API_URL` environment variable, when set, overrides the
    /// base URL from the file.
    pub fn get_config(&self) -> ClientConfig {
        // Check if already cached
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let mut loaded = self.load_config();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                loaded.api_base_url = url.trim().to_string();
            }
        }

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

    fn load_config(&self) -> ClientConfig {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => match NotiflowPaths::config_file() {
                Ok(path) => path,
                Err(err) => {
                    warn!(error = %err, "cannot resolve config path; using defaults");
                    return ClientConfig::default();
                }
            },
        };

        if !path.exists() {
            return ClientConfig::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read config; using defaults");
                return ClientConfig::default();
            }
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed config; using defaults");
                ClientConfig::default()
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.get_config(), ClientConfig::default());
    }

    #[test]
    fn test_loads_and_caches_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_base_url = \"http://localhost:8080\"\ntimeout_secs = 3\n").unwrap();

        let service = ConfigService::with_path(&path);
        let config = service.get_config();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);

        // Cached: a file change without invalidation is not observed.
        fs::write(&path, "timeout_secs = 99\n").unwrap();
        assert_eq!(service.get_config().timeout_secs, 3);

        service.invalidate_cache();
        assert_eq!(service.get_config().timeout_secs, 99);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_base_url = [not toml").unwrap();

        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config(), ClientConfig::default());
    }
}
