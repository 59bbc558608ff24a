//! File-backed Token Cache
//!
//! Persists the access token as JSON so only the first run is interactive.
//! A missing or unreadable-as-JSON cache is treated as "not authorized yet";
//! an IO failure other than not-found is surfaced.

use crate::error::{AuthError, Result};
use crate::types::AccessToken;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// JSON token cache at a fixed path.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached token, if any.
    pub fn load(&self) -> Result<Option<AccessToken>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AuthError::TokenCache {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                // Corrupt cache: re-authorize instead of refusing to run.
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable token cache");
                Ok(None)
            }
        }
    }

    /// Persist the token, creating parent directories as needed.
    pub fn save(&self, token: &AccessToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AuthError::TokenCache {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        }

        let json = serde_json::to_vec_pretty(token).map_err(|e| AuthError::TokenCache {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        fs::write(&self.path, json).map_err(|e| AuthError::TokenCache {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}
