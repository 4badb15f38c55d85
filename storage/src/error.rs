//! Storage error types.
//!
//! Used by the repository and propagated unchanged to callers; nothing here is retried.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A stored row could not be decoded (unknown message_type, bad timestamp).
    #[error("Invalid row {id}: {reason}")]
    InvalidRow { id: i64, reason: String },
}
