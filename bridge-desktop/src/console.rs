//! Console Prompt Implementation
//!
//! Reads the OAuth verifier code from standard input. Stdin has no async
//! story worth having for a single line, so the read runs on the blocking
//! pool.

use async_trait::async_trait;
use bridge_traits::console::Prompt;
use std::io::Write;

/// Prompt implementation backed by the process terminal.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Prompt for StdinPrompt {
    async fn prompt_line(&self, message: &str) -> std::io::Result<String> {
        let message = message.to_string();
        tokio::task::spawn_blocking(move || {
            let mut stdout = std::io::stdout();
            write!(stdout, "{}", message)?;
            stdout.flush()?;

            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            Ok(line.trim().to_string())
        })
        .await
        .map_err(|e| std::io::Error::other(format!("prompt task failed: {}", e)))?
    }
}
