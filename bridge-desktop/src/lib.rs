//! # Desktop Bridge Implementations
//!
//! Concrete desktop adapters for the `bridge-traits` contracts:
//!
//! - [`ReqwestHttpClient`] - HTTP over reqwest, one attempt per request
//! - [`StdinPrompt`] - console prompt reading from standard input

pub mod console;
pub mod http;

pub use console::StdinPrompt;
pub use http::ReqwestHttpClient;
