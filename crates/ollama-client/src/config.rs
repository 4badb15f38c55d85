//! Endpoint configuration, fixed at startup.

use std::time::Duration;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
/// Multimodal model, so both text and photo prompts work with the default setup.
pub const DEFAULT_MODEL: &str = "llava";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Where and how to call the inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    /// Full URL of the generate endpoint.
    pub url: String,
    pub model: String,
    /// Upper bound for one request, including reading the body.
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OllamaConfig {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
