//! Common error types for skinsight

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for skinsight operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised below the page handler boundary
#[derive(Error, Debug)]
pub enum Error {
    /// Credential database could not be opened, read or written
    #[error("Credential store error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error (root folder, uploads directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file present but unreadable or malformed
    #[error("Configuration error in {}: {}", .path.display(), .reason)]
    Config { path: PathBuf, reason: String },
}
