//! Photo Service Abstraction
//!
//! The seam between the sync engine and the remote photo host. The engine
//! only ever correlates by title: album titles against local folder names and
//! photo titles against local file stems. Service-assigned identifiers are
//! opaque strings.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// Remote album/photo operations required by one sync pass.
///
/// Title-keyed maps collapse duplicate titles last-wins; the service does not
/// guarantee unique titles but this system treats them as unique.
///
/// Every method performs exactly one attempt. A failure is expected to abort
/// the sync pass (no retry, no rollback of earlier mutations).
#[async_trait]
pub trait PhotoService: Send + Sync {
    /// List all albums of the configured user as title → album id.
    async fn list_albums(&self) -> Result<HashMap<String, String>>;

    /// List the photos of one album as title → photo id.
    async fn list_photos(&self, album_id: &str) -> Result<HashMap<String, String>>;

    /// Upload a local file with visibility restricted to the owner's
    /// contacts (friends and family, not public). The photo title is the
    /// filename without its final extension. Returns the new photo id.
    async fn upload(&self, path: &Path) -> Result<String>;

    /// Create an album with the given title (also used as description) and
    /// cover photo. Returns the new album id.
    async fn create_album(&self, title: &str, primary_photo_id: &str) -> Result<String>;

    /// Attach an existing photo to an existing album.
    async fn add_to_album(&self, album_id: &str, photo_id: &str) -> Result<()>;

    /// Apply an absolute display order to the user's albums.
    async fn order_albums(&self, album_ids: &[String]) -> Result<()>;
}
