//! Error types for aeris-store.

use std::path::PathBuf;

/// Result type for aeris-store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Seeding a city failed, the whole seed transaction was rolled back
    #[error("Failed to seed {city}: {source}")]
    Seed {
        city: String,
        source: rusqlite::Error,
    },

    /// A blocking database task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
