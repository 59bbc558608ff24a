//! Serde models for Flickr REST responses.
//!
//! Flickr's JSON is loosely typed: numbers arrive as numbers or strings
//! depending on the endpoint, and titles are sometimes wrapped in a
//! `{"_content": ...}` object. The models here normalize both quirks.

use serde::{Deserialize, Deserializer};

/// Accept a number whether it is serialized as a JSON number or a string.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn one() -> u32 {
    1
}

/// `{"_content": "..."}` wrapper used for titles and descriptions.
#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(rename = "_content")]
    pub content: String,
}

/// Envelope status present on every REST response.
#[derive(Debug, Deserialize)]
pub struct RestStatus {
    pub stat: String,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhotosetEntry {
    pub id: String,
    pub title: Content,
}

#[derive(Debug, Deserialize)]
pub struct Photosets {
    #[serde(default = "one", deserialize_with = "lenient_u32")]
    pub page: u32,
    #[serde(default = "one", deserialize_with = "lenient_u32")]
    pub pages: u32,
    #[serde(default)]
    pub photoset: Vec<PhotosetEntry>,
}

/// `flickr.photosets.getList`
#[derive(Debug, Deserialize)]
pub struct PhotosetsListResponse {
    pub photosets: Photosets,
}

#[derive(Debug, Deserialize)]
pub struct PhotoEntry {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PhotosetPhotos {
    #[serde(default = "one", deserialize_with = "lenient_u32")]
    pub page: u32,
    #[serde(default = "one", deserialize_with = "lenient_u32")]
    pub pages: u32,
    #[serde(default)]
    pub photo: Vec<PhotoEntry>,
}

/// `flickr.photosets.getPhotos`
#[derive(Debug, Deserialize)]
pub struct PhotosetPhotosResponse {
    pub photoset: PhotosetPhotos,
}

#[derive(Debug, Deserialize)]
pub struct CreatedPhotoset {
    pub id: String,
}

/// `flickr.photosets.create`
#[derive(Debug, Deserialize)]
pub struct CreatePhotosetResponse {
    pub photoset: CreatedPhotoset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photosets_list_deserialization() {
        let json = r#"{
            "photosets": {
                "page": 1,
                "pages": 1,
                "perpage": 500,
                "total": 2,
                "photoset": [
                    {"id": "721001", "primary": "50001", "photos": "3",
                     "title": {"_content": "2024_Q1"}, "description": {"_content": ""}},
                    {"id": "721002", "primary": "50002", "photos": 1,
                     "title": {"_content": "2023_Q4"}, "description": {"_content": ""}}
                ]
            },
            "stat": "ok"
        }"#;

        let parsed: PhotosetsListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.photosets.pages, 1);
        assert_eq!(parsed.photosets.photoset.len(), 2);
        assert_eq!(parsed.photosets.photoset[0].title.content, "2024_Q1");
        assert_eq!(parsed.photosets.photoset[1].id, "721002");
    }

    #[test]
    fn test_photoset_photos_with_string_page_numbers() {
        let json = r#"{
            "photoset": {
                "id": "721001",
                "page": "1",
                "pages": "2",
                "per_page": "500",
                "photo": [
                    {"id": "9001", "secret": "x", "title": "a"},
                    {"id": "9002", "secret": "y", "title": "b"}
                ]
            },
            "stat": "ok"
        }"#;

        let parsed: PhotosetPhotosResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.photoset.pages, 2);
        assert_eq!(parsed.photoset.photo[0].title, "a");
    }

    #[test]
    fn test_missing_photoset_array_defaults_empty() {
        let json = r#"{"photosets": {"page": 1, "pages": 0, "total": 0}, "stat": "ok"}"#;
        let parsed: PhotosetsListResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.photosets.photoset.is_empty());
    }

    #[test]
    fn test_rest_status_failure() {
        let json = r#"{"stat": "fail", "code": 1, "message": "Photoset not found"}"#;
        let status: RestStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.stat, "fail");
        assert_eq!(status.code, Some(1));
    }
}
