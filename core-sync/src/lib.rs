//! # Sync Module
//!
//! One-directional album synchronization: local folders → remote albums.
//!
//! ## Overview
//!
//! - **Local inventory** (`library`): walks the root directory and produces
//!   albums (folders holding at least one file, at any depth) and their
//!   stem-keyed photo maps.
//! - **Sync engine** (`engine`): diffs local inventory against the remote
//!   album/photo maps by title, uploads what is missing, creates absent
//!   albums (bootstrapped with their lexicographically-first photo as cover)
//!   and finally reorders all albums by descending title.
//!
//! Remote-only content is never modified or removed. The pass is fail-fast
//! and not transactional: the first error aborts, completed uploads stay.

pub mod engine;
pub mod error;
pub mod library;

pub use engine::{SyncEngine, SyncReport};
pub use error::{Result, SyncError};
pub use library::{LocalAlbum, LocalLibrary};
