use crate::types::Perms;
use bridge_traits::error::RemoteServiceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No usable token for the required permission level. Triggers the
    /// interactive authorization flow instead of aborting.
    #[error("Authorization required: no token with '{required}' permission")]
    AuthorizationRequired { required: Perms },

    #[error("Invalid permission level: {0}")]
    InvalidPerms(String),

    #[error("Token cache error at {path}: {reason}")]
    TokenCache { path: PathBuf, reason: String },

    #[error("Console prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error(transparent)]
    Service(#[from] RemoteServiceError),
}

pub type Result<T> = std::result::Result<T, AuthError>;
