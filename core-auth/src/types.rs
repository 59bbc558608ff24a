//! Credential and permission types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// API key and secret identifying this application to the service.
#[derive(Debug, Clone)]
pub struct Consumer {
    pub key: String,
    pub secret: String,
}

impl Consumer {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// Temporary credentials from the first authorization leg.
#[derive(Debug, Clone)]
pub struct RequestToken {
    pub token: String,
    pub secret: String,
}

/// Long-lived credentials obtained after the user grants access.
///
/// Serialized as-is into the token cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub secret: String,
    pub user_nsid: String,
    pub username: String,
}

/// Permission levels, ordered: `delete` implies `write` implies `read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Perms {
    Read,
    Write,
    Delete,
}

impl fmt::Display for Perms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Perms::Read => "read",
            Perms::Write => "write",
            Perms::Delete => "delete",
        };
        f.write_str(s)
    }
}

impl FromStr for Perms {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Perms::Read),
            "write" => Ok(Perms::Write),
            "delete" => Ok(Perms::Delete),
            other => Err(format!("unknown permission level '{}'", other)),
        }
    }
}
