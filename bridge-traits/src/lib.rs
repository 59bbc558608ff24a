//! # Bridge Traits
//!
//! Abstraction traits between the sync core and the outside world.
//!
//! ## Overview
//!
//! This crate defines the contract consumed by the sync engine and the auth
//! flow so that the concrete transport (reqwest), the concrete photo service
//! (Flickr) and the interactive console can all be swapped for test doubles.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - single-attempt async HTTP execution
//! - [`PhotoService`](photos::PhotoService) - remote album/photo operations
//! - [`Prompt`](console::Prompt) - one-line console interaction for the
//!   first-run authorization step
//!
//! ## Error Handling
//!
//! Remote-facing traits use [`RemoteServiceError`](error::RemoteServiceError).
//! There is no retry layer anywhere behind these traits: every operation is
//! attempted exactly once and the first failure aborts the run.

pub mod console;
pub mod error;
pub mod http;
pub mod photos;

pub use console::Prompt;
pub use error::{RemoteServiceError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, MultipartPart};
pub use photos::PhotoService;
