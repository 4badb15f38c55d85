//! Tagged result of one inference call.

use std::fmt::Display;

use thiserror::Error;

/// Prefix of every error reply, so users and stored rows show failures the same way.
pub const ERROR_MARKER: &str = "Error";

/// Why an inference call produced no completion. Display strings are meant for end users and
/// carry no transport internals; those are logged where the failure is detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceFailure {
    #[error("the AI service did not answer within {0} seconds")]
    Timeout(u64),
    #[error("could not reach the AI service")]
    Connect,
    #[error("the AI service responded with HTTP status {0}")]
    Status(u16),
    #[error("the AI service sent a response that could not be read")]
    Malformed,
    #[error("the AI service returned an empty answer")]
    Empty,
}

/// `Success(completion)` or `Failure(reason)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    Success(String),
    Failure(InferenceFailure),
}

impl InferenceOutcome {
    /// Text to send back and to persist: the completion, or an [`ERROR_MARKER`]-prefixed reason.
    pub fn reply_text(&self) -> String {
        match self {
            InferenceOutcome::Success(text) => text.clone(),
            InferenceOutcome::Failure(reason) => error_reply(reason),
        }
    }
}

/// Formats a user-facing error line: `Error: <reason>`.
pub fn error_reply(reason: impl Display) -> String {
    format!("{}: {}", ERROR_MARKER, reason)
}
