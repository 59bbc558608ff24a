//! Local photo inventory.
//!
//! A folder anywhere under the root is an album if it directly or
//! transitively contains at least one regular file; folders holding only
//! empty sub-folders are not albums. Album names are the bare folder names
//! and double as remote album titles, so duplicates at different depths
//! collapse last-wins exactly like duplicate remote titles do.

use crate::error::{Result, SyncError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One local album: a named folder with at least one file somewhere below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAlbum {
    pub name: String,
    pub path: PathBuf,
}

/// Read-only view over the local album tree.
#[derive(Debug, Clone)]
pub struct LocalLibrary {
    root: PathBuf,
}

impl LocalLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn fs_err(path: &Path, err: walkdir::Error) -> SyncError {
        let io = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        SyncError::Filesystem {
            path: path.to_path_buf(),
            source: io,
        }
    }

    /// Does this directory contain at least one regular file, at any depth?
    fn contains_file(dir: &Path) -> Result<bool> {
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| Self::fs_err(dir, e))?;
            if entry.file_type().is_file() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Enumerate all albums under the root, sorted by name.
    ///
    /// # Errors
    ///
    /// [`SyncError::Filesystem`] if the root (or any sub-tree) is unreadable.
    pub fn albums(&self) -> Result<Vec<LocalAlbum>> {
        let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();

        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = entry.map_err(|e| Self::fs_err(&self.root, e))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if Self::contains_file(entry.path())? {
                let name = entry.file_name().to_string_lossy().into_owned();
                found.insert(name, entry.path().to_path_buf());
            }
        }

        debug!(root = %self.root.display(), count = found.len(), "Scanned local albums");
        Ok(found
            .into_iter()
            .map(|(name, path)| LocalAlbum { name, path })
            .collect())
    }

    /// Map every file under the album folder (recursively) from its stem to
    /// its path.
    ///
    /// # Errors
    ///
    /// [`SyncError::StemCollision`] when two files share a stem — the stem is
    /// the only correlation key against remote titles, so a collision would
    /// otherwise silently drop a photo.
    pub fn photos(&self, album: &LocalAlbum) -> Result<BTreeMap<String, PathBuf>> {
        let mut photos: BTreeMap<String, PathBuf> = BTreeMap::new();

        for entry in WalkDir::new(&album.path) {
            let entry = entry.map_err(|e| Self::fs_err(&album.path, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let stem = match path.file_stem() {
                Some(stem) => stem.to_string_lossy().into_owned(),
                None => continue,
            };

            if let Some(existing) = photos.get(&stem) {
                return Err(SyncError::StemCollision {
                    album: album.name.clone(),
                    stem,
                    existing: existing.clone(),
                    conflicting: path.to_path_buf(),
                });
            }
            photos.insert(stem, path.to_path_buf());
        }

        Ok(photos)
    }
}
