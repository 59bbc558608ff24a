//! Sync engine.
//!
//! One pass over the local albums: create what is missing remotely (seeded
//! with a bootstrap cover photo, since album creation requires one), upload
//! and attach photos whose stems have no remote title yet, then apply a
//! descending-by-title display order to every known album.

use crate::error::{Result, SyncError};
use crate::library::LocalLibrary;
use bridge_traits::photos::PhotoService;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Counts of what one sync pass did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub albums_created: usize,
    pub photos_uploaded: usize,
    pub photos_skipped: usize,
}

/// Drives one local → remote synchronization pass.
pub struct SyncEngine {
    library: LocalLibrary,
    service: Arc<dyn PhotoService>,
}

impl SyncEngine {
    pub fn new(library: LocalLibrary, service: Arc<dyn PhotoService>) -> Self {
        Self { library, service }
    }

    /// Run one full pass: sync every local album, then reorder.
    ///
    /// Not transactional — the first error aborts the pass and mutations
    /// already applied remain in place.
    pub async fn run(&self) -> Result<SyncReport> {
        let albums = self.library.albums()?;
        let mut remote = self.service.list_albums().await?;
        let mut report = SyncReport::default();

        info!(
            local = albums.len(),
            remote = remote.len(),
            "Starting sync pass"
        );

        for album in &albums {
            let mut photos = self.library.photos(album)?;

            if !remote.contains_key(&album.name) {
                // Album creation needs a cover photo: upload the
                // lexicographically-first one as bootstrap.
                let (stem, path) = photos
                    .pop_first()
                    .ok_or_else(|| SyncError::EmptyAlbum(album.name.clone()))?;

                info!("uploading {}", path.display());
                let photo_id = self.service.upload(&path).await?;
                debug!(stem = %stem, photo_id = %photo_id, "Bootstrap photo uploaded");

                info!("creating album {}", album.name);
                let album_id = self.service.create_album(&album.name, &photo_id).await?;

                remote.insert(album.name.clone(), album_id);
                report.albums_created += 1;
                report.photos_uploaded += 1;
            }

            let album_id = &remote[&album.name];
            // Always re-fetched so a creation above is observed.
            let existing = self.service.list_photos(album_id).await?;

            for (stem, path) in &photos {
                if existing.contains_key(stem) {
                    report.photos_skipped += 1;
                    continue;
                }

                info!("uploading {}", path.display());
                let photo_id = self.service.upload(path).await?;
                self.service.add_to_album(album_id, &photo_id).await?;
                report.photos_uploaded += 1;
            }
        }

        self.reorder(&remote).await?;

        info!(
            albums_created = report.albums_created,
            photos_uploaded = report.photos_uploaded,
            photos_skipped = report.photos_skipped,
            "Sync pass complete"
        );
        Ok(report)
    }

    /// Apply a descending lexicographic title order to all known albums.
    async fn reorder(&self, remote: &HashMap<String, String>) -> Result<()> {
        if remote.is_empty() {
            return Ok(());
        }

        let mut titles: Vec<&String> = remote.keys().collect();
        titles.sort();
        titles.reverse();

        let ids: Vec<String> = titles.iter().map(|t| remote[*t].clone()).collect();
        self.service.order_albums(&ids).await?;
        Ok(())
    }
}
