//! File-backed session token storage.

use crate::paths::NotiflowPaths;
use notiflow_core::auth::TokenStore;
use notiflow_core::error::{NotiflowError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists the bearer token as a single file under the notiflow config
/// directory.
///
/// Responsibilities:
/// - Create the parent directory on first save
/// - Store and load the token verbatim (trimming trailing whitespace)
/// - Remove the file on clear; clearing a missing file is not an error
///
/// # Security Note
///
/// The token is stored in plaintext. On Unix the file is written with
/// owner-only permissions (0600). Error messages never include the token.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Creates a storage instance at the default location
    /// (`~/.config/notiflow/token`).
    pub fn new() -> Result<Self> {
        let path = NotiflowPaths::token_file()
            .map_err(|e| NotiflowError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a storage instance with a custom path (for testing).
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path to the token file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    #[cfg(unix)]
    fn restrict_permissions(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(&self.path, perms)?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn restrict_permissions(&self) -> Result<()> {
        Ok(())
    }
}

impl TokenStore for FileTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let token = fs::read_to_string(&self.path)?;
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        self.restrict_permissions()?;
        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!(path = %self.path.display(), "session token cleared");
        }
        Ok(())
    }
}
