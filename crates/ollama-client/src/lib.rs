//! # Inference client
//!
//! Defines the [`InferenceClient`] trait and an Ollama implementation ([`OllamaClient`]) that talks
//! to a `/api/generate` endpoint. Used by vbot-handlers.
//!
//! Failures never escape as `Err`: every call yields an [`InferenceOutcome`], and
//! [`InferenceOutcome::reply_text`] turns it into the text that is both sent to the user and stored.
//!
//! ```rust,no_run
//! use ollama_client::{InferenceClient, OllamaClient, OllamaConfig};
//!
//! async fn example() -> Result<(), reqwest::Error> {
//!     let client = OllamaClient::new(OllamaConfig::default())?;
//!     let outcome = client.generate_text("Why is the sky blue?").await;
//!     println!("{}", outcome.reply_text());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

mod config;
mod ollama;
mod outcome;

pub use config::{OllamaConfig, DEFAULT_MODEL, DEFAULT_OLLAMA_URL, DEFAULT_TIMEOUT_SECS};
pub use ollama::OllamaClient;
pub use outcome::{error_reply, InferenceFailure, InferenceOutcome, ERROR_MARKER};

/// Client for a generate-style inference endpoint. One attempt per call, no retries.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Completes a text-only prompt.
    async fn generate_text(&self, prompt: &str) -> InferenceOutcome;

    /// Completes a prompt about one image (raw bytes; encoded by the client).
    async fn generate_from_image(&self, prompt: &str, image: &[u8]) -> InferenceOutcome;
}
