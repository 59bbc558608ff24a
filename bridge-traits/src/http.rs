//! HTTP Client Abstraction
//!
//! Minimal async HTTP surface: one request in, one response out. Multipart
//! bodies are modelled explicitly because the photo upload endpoint takes
//! form fields plus a single file part.

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{RemoteServiceError, Result};

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A named part of a multipart/form-data body.
///
/// `filename` is set only on the file part; plain form fields leave it empty.
#[derive(Debug, Clone)]
pub struct MultipartPart {
    pub name: String,
    pub filename: Option<String>,
    pub data: Bytes,
}

impl MultipartPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            data: Bytes::from(value.into().into_bytes()),
        }
    }

    pub fn file(name: impl Into<String>, filename: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            data,
        }
    }
}

/// A multipart/form-data body.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub parts: Vec<MultipartPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart::text(name, value));
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        data: Bytes,
    ) -> Self {
        self.parts.push(MultipartPart::file(name, filename, data));
        self
    }
}

/// HTTP request builder
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub multipart: Option<MultipartForm>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            multipart: None,
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set an `application/x-www-form-urlencoded` body.
    pub fn form(mut self, encoded: impl Into<String>) -> Self {
        self.body = Some(Bytes::from(encoded.into().into_bytes()));
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.multipart = Some(form);
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    /// Parse response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| RemoteServiceError::Parse(format!("JSON deserialization failed: {}", e)))
    }

    /// Get response body as UTF-8 string
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| RemoteServiceError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP client trait.
///
/// Implementations execute each request exactly once; failure semantics are
/// decided by the caller, never by the transport.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request
    ///
    /// # Errors
    ///
    /// Returns [`RemoteServiceError::Transport`] if the connection fails or
    /// times out. Non-2xx statuses are returned as ordinary responses.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_builder() {
        let request = HttpRequest::new(HttpMethod::Get, "https://example.com")
            .header("User-Agent", "test")
            .timeout(Duration::from_secs(30));

        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.headers.get("User-Agent"), Some(&"test".to_string()));
        assert!(request.body.is_none());
        assert!(request.multipart.is_none());
    }

    #[test]
    fn test_form_body_sets_content_type() {
        let request =
            HttpRequest::new(HttpMethod::Post, "https://example.com").form("a=1&b=two");

        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/x-www-form-urlencoded".to_string())
        );
        assert_eq!(request.body.unwrap(), Bytes::from("a=1&b=two"));
    }

    #[test]
    fn test_multipart_form_parts() {
        let form = MultipartForm::new()
            .text("title", "sunset")
            .file("photo", "sunset.jpg", Bytes::from_static(b"\xff\xd8"));

        assert_eq!(form.parts.len(), 2);
        assert!(form.parts[0].filename.is_none());
        assert_eq!(form.parts[1].filename.as_deref(), Some("sunset.jpg"));
    }

    #[test]
    fn test_http_response_helpers() {
        let response = HttpResponse {
            status: 200,
            body: Bytes::from(r#"{"stat":"ok"}"#),
        };

        assert!(response.is_success());
        assert_eq!(response.text().unwrap(), r#"{"stat":"ok"}"#);

        let response = HttpResponse {
            status: 503,
            body: Bytes::new(),
        };
        assert!(!response.is_success());
    }
}
