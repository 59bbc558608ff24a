//! # Flickr Provider
//!
//! Implements the [`PhotoService`](bridge_traits::photos::PhotoService) trait
//! over the Flickr REST and upload endpoints.
//!
//! REST calls are requested as JSON (`format=json&nojsoncallback=1`); the
//! upload endpoint answers XML only. All calls are OAuth 1.0a signed with the
//! consumer credentials and the user's access token.

pub mod connector;
pub mod types;
mod upload;

pub use connector::FlickrConnector;
