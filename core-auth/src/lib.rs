//! # Authentication Module
//!
//! OAuth 1.0a authorization for the Flickr API.
//!
//! ## Overview
//!
//! Flickr still speaks OAuth 1.0a: every API call carries an HMAC-SHA1
//! signature over its parameters, and first-run authorization is the classic
//! three-leg dance (request token → user grants access in a browser → the
//! out-of-band verifier code is exchanged for an access token).
//!
//! ## Components
//!
//! - [`OauthSigner`] - RFC 5849 parameter signing, shared with the provider
//! - [`AuthFlow`] - the three authorization legs plus token validation
//! - [`FileTokenStore`] - JSON token cache so only the first run is interactive
//! - [`AuthManager`] - decides between cached reuse and interactive flow

pub mod error;
pub mod flow;
pub mod manager;
pub mod signer;
pub mod token_store;
pub mod types;

pub use error::{AuthError, Result};
pub use flow::AuthFlow;
pub use manager::AuthManager;
pub use signer::OauthSigner;
pub use token_store::FileTokenStore;
pub use types::{AccessToken, Consumer, Perms, RequestToken};
