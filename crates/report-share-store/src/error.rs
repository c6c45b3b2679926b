//! Error types for the store module.

use report_share_core::CoreError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Settings encoding/decoding error.
    #[error("serialization error: {0}")]
    Serialization(#[from] CoreError),

    /// Another report already holds this share token.
    #[error("share token {token} already belongs to report {existing}")]
    TokenConflict { token: String, existing: String },

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A lock guarding shared state was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// A blocking database task failed to complete.
    #[error("blocking task failed: {0}")]
    Task(String),

    /// The backend refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
