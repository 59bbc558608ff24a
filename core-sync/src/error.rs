use bridge_traits::error::RemoteServiceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Root or album tree missing or unreadable. Raised before any remote
    /// mutation when it concerns the root.
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two files in one album share a stem. The stem is the correlation key
    /// against remote titles, so keeping both would silently drop one.
    #[error(
        "Duplicate photo stem '{stem}' in album '{album}': {existing} vs {conflicting}"
    )]
    StemCollision {
        album: String,
        stem: String,
        existing: PathBuf,
        conflicting: PathBuf,
    },

    /// An album vanished (or was emptied) between scanning and syncing.
    #[error("Album '{0}' has no photos")]
    EmptyAlbum(String),

    #[error(transparent)]
    Remote(#[from] RemoteServiceError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
