//! Flickr API connector
//!
//! Implements the `PhotoService` trait: reads go through signed GET query
//! strings, mutations through signed form-encoded POSTs, and uploads through
//! a signed multipart POST where the file part stays outside the signature.

use async_trait::async_trait;
use bridge_traits::error::{RemoteServiceError, Result};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, MultipartForm};
use bridge_traits::photos::PhotoService;
use bytes::Bytes;
use core_auth::{AccessToken, Consumer, OauthSigner};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::types::{
    CreatePhotosetResponse, PhotosetPhotosResponse, PhotosetsListResponse, RestStatus,
};
use crate::upload;

const REST_URL: &str = "https://api.flickr.com/services/rest/";
const UPLOAD_URL: &str = "https://up.flickr.com/services/upload/";

/// Photos per page when listing album contents (service maximum).
const PHOTOS_PER_PAGE: u32 = 500;

/// Upload visibility: friends and family only, never public.
const VISIBILITY: [(&str, &str); 3] = [("is_public", "0"), ("is_friend", "1"), ("is_family", "1")];

/// Flickr connector holding the signing material for one authorized user.
pub struct FlickrConnector {
    http: Arc<dyn HttpClient>,
    signer: OauthSigner,
    access: AccessToken,
    user_id: String,
}

impl FlickrConnector {
    /// Create a connector for the user that owns `access`. The album listing
    /// is scoped to that user's NSID.
    pub fn new(http: Arc<dyn HttpClient>, consumer: &Consumer, access: AccessToken) -> Self {
        let user_id = access.user_nsid.clone();
        Self {
            http,
            signer: OauthSigner::new(consumer),
            access,
            user_id,
        }
    }

    /// Override the account whose albums are listed.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    fn token(&self) -> Option<(&str, &str)> {
        Some((self.access.token.as_str(), self.access.secret.as_str()))
    }

    /// Execute one signed REST call and return the raw body after envelope
    /// (`stat`) checking.
    async fn call(
        &self,
        api_method: &str,
        http_method: HttpMethod,
        extra: &[(&str, String)],
    ) -> Result<Bytes> {
        let mut params: Vec<(String, String)> = vec![
            ("method".to_string(), api_method.to_string()),
            ("format".to_string(), "json".to_string()),
            ("nojsoncallback".to_string(), "1".to_string()),
        ];
        params.extend(extra.iter().map(|(k, v)| (k.to_string(), v.clone())));

        let verb = match http_method {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        };
        let signed = self.signer.sign(verb, REST_URL, &params, self.token());
        let encoded = serde_urlencoded::to_string(&signed)
            .map_err(|e| RemoteServiceError::Parse(format!("query encoding failed: {}", e)))?;

        let request = match http_method {
            HttpMethod::Get => {
                HttpRequest::new(HttpMethod::Get, format!("{}?{}", REST_URL, encoded))
            }
            HttpMethod::Post => HttpRequest::new(HttpMethod::Post, REST_URL).form(encoded),
        };

        debug!(method = api_method, "Calling Flickr REST API");
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            return Err(RemoteServiceError::HttpStatus {
                status: response.status,
                body: response.text().unwrap_or_default(),
            });
        }

        let status: RestStatus = response.json()?;
        if status.stat != "ok" {
            return Err(RemoteServiceError::Api {
                code: status.code.unwrap_or(-1),
                message: status
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        Ok(response.body)
    }
}

#[async_trait]
impl PhotoService for FlickrConnector {
    async fn list_albums(&self) -> Result<HashMap<String, String>> {
        let mut albums = HashMap::new();
        let mut page = 1u32;

        loop {
            let body = self
                .call(
                    "flickr.photosets.getList",
                    HttpMethod::Get,
                    &[
                        ("user_id", self.user_id.clone()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;

            let parsed: PhotosetsListResponse = serde_json::from_slice(&body)
                .map_err(|e| RemoteServiceError::Parse(format!("bad photoset list: {}", e)))?;

            for set in parsed.photosets.photoset {
                // Duplicate titles collapse last-wins; the engine treats
                // titles as unique.
                albums.insert(set.title.content, set.id);
            }

            if page >= parsed.photosets.pages {
                break;
            }
            page += 1;
        }

        info!(count = albums.len(), "Listed remote albums");
        Ok(albums)
    }

    async fn list_photos(&self, album_id: &str) -> Result<HashMap<String, String>> {
        let mut photos = HashMap::new();
        let mut page = 1u32;

        loop {
            let body = self
                .call(
                    "flickr.photosets.getPhotos",
                    HttpMethod::Get,
                    &[
                        ("user_id", self.user_id.clone()),
                        ("photoset_id", album_id.to_string()),
                        ("per_page", PHOTOS_PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;

            let parsed: PhotosetPhotosResponse = serde_json::from_slice(&body)
                .map_err(|e| RemoteServiceError::Parse(format!("bad photoset photos: {}", e)))?;

            for photo in parsed.photoset.photo {
                photos.insert(photo.title, photo.id);
            }

            if page >= parsed.photoset.pages {
                break;
            }
            page += 1;
        }

        debug!(album_id, count = photos.len(), "Listed album photos");
        Ok(photos)
    }

    async fn upload(&self, path: &Path) -> Result<String> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                RemoteServiceError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("not a file path: {}", path.display()),
                ))
            })?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.clone());

        let bytes = tokio::fs::read(path).await?;

        let mut params: Vec<(String, String)> = vec![("title".to_string(), title)];
        params.extend(
            VISIBILITY
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );

        // The file part is excluded from the OAuth signature; every other
        // field is signed and sent as a plain form part.
        let signed = self.signer.sign("POST", UPLOAD_URL, &params, self.token());
        let mut form = MultipartForm::new();
        for (key, value) in signed {
            form = form.text(key, value);
        }
        form = form.file("photo", filename, Bytes::from(bytes));

        let request = HttpRequest::new(HttpMethod::Post, UPLOAD_URL).multipart(form);
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            return Err(RemoteServiceError::HttpStatus {
                status: response.status,
                body: response.text().unwrap_or_default(),
            });
        }

        let photo_id = upload::parse_photo_id(&response.text()?)?;
        info!(path = %path.display(), photo_id, "Uploaded photo");
        Ok(photo_id)
    }

    async fn create_album(&self, title: &str, primary_photo_id: &str) -> Result<String> {
        let body = self
            .call(
                "flickr.photosets.create",
                HttpMethod::Post,
                &[
                    ("title", title.to_string()),
                    ("description", title.to_string()),
                    ("primary_photo_id", primary_photo_id.to_string()),
                ],
            )
            .await?;

        let parsed: CreatePhotosetResponse = serde_json::from_slice(&body)
            .map_err(|e| RemoteServiceError::Parse(format!("bad photoset create: {}", e)))?;

        info!(title, album_id = %parsed.photoset.id, "Created remote album");
        Ok(parsed.photoset.id)
    }

    async fn add_to_album(&self, album_id: &str, photo_id: &str) -> Result<()> {
        self.call(
            "flickr.photosets.addPhoto",
            HttpMethod::Post,
            &[
                ("photoset_id", album_id.to_string()),
                ("photo_id", photo_id.to_string()),
            ],
        )
        .await?;

        debug!(album_id, photo_id, "Attached photo to album");
        Ok(())
    }

    async fn order_albums(&self, album_ids: &[String]) -> Result<()> {
        self.call(
            "flickr.photosets.orderSets",
            HttpMethod::Post,
            &[("photoset_ids", album_ids.join(","))],
        )
        .await?;

        info!(count = album_ids.len(), "Applied album display order");
        Ok(())
    }
}
