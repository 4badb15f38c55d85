//! Error types for the bot core.

use thiserror::Error;

/// Top-level error for handling one message (database, bot transport, IO).
///
/// Inference failures are not errors: they travel as values and end up in the reply.
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
