//! Console Interaction
//!
//! The authorization flow needs exactly one human step: visit a URL, type a
//! verifier code back in. Abstracted so the auth manager is testable without
//! a terminal.

use async_trait::async_trait;

/// One-line console prompt.
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Display `message` and read one trimmed line of input.
    async fn prompt_line(&self, message: &str) -> std::io::Result<String>;
}
