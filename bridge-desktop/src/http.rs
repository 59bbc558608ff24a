//! HTTP Client Implementation using Reqwest
//!
//! One attempt per request: the sync pass is fail-fast and must not paper
//! over transient service errors with hidden retries.

use async_trait::async_trait;
use bridge_traits::{
    error::{RemoteServiceError, Result},
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm},
};
use reqwest::multipart;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Reqwest-based HTTP client implementation.
///
/// Connection pooling and TLS come from reqwest; retry deliberately does not.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(120))
    }

    /// Create a new HTTP client with custom timeout
    ///
    /// The default is generous because photo uploads can be large.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("flickrsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }

    fn convert_multipart(form: MultipartForm) -> multipart::Form {
        let mut out = multipart::Form::new();
        for part in form.parts {
            let piece = match part.filename {
                Some(filename) => multipart::Part::bytes(part.data.to_vec()).file_name(filename),
                None => multipart::Part::bytes(part.data.to_vec()),
            };
            out = out.part(part.name, piece);
        }
        out
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(form) = request.multipart {
            req = req.multipart(Self::convert_multipart(form));
        } else if let Some(body) = request.body {
            req = req.body(body);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        req
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, method = ?request.method, "Executing HTTP request");

        let req = self.build_request(request);

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                RemoteServiceError::Transport("Request timed out".to_string())
            } else if e.is_connect() {
                RemoteServiceError::Transport(format!("Connection failed: {}", e))
            } else {
                RemoteServiceError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteServiceError::Transport(e.to_string()))?;

        debug!(status = status, bytes = body.len(), "HTTP response received");

        Ok(HttpResponse { status, body })
    }
}
