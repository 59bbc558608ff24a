use thiserror::Error;

/// Failure of any remote-service interaction: transport, HTTP status,
/// API-level rejection or an unparseable response.
///
/// The run is fail-fast: none of these are retried or contained.
#[derive(Error, Debug)]
pub enum RemoteServiceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Remote API error (code {code}): {message}")]
    Api { code: i64, message: String },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RemoteServiceError>;
