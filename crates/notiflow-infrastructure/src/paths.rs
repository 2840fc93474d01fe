//! Unified path management for notiflow client files.
//!
//! Everything the client persists lives under one configuration directory
//! so that support can point users at a single place to wipe.
//!
//! ```text
//! ~/.config/notiflow/
//! ├── config.toml   # Client configuration
//! └── token         # Bearer token for the active session
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the notiflow client.
pub struct NotiflowPaths;

impl NotiflowPaths {
    /// Returns the notiflow configuration directory (`~/.config/notiflow/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("notiflow"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session token.
    pub fn token_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("token"))
    }
}
