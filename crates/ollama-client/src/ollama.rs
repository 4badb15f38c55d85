//! Ollama implementation of [`InferenceClient`]: `POST {model, prompt, stream: false, images?}` to
//! the generate endpoint and read the `response` field.

use std::time::Instant;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::OllamaConfig;
use crate::outcome::{InferenceFailure, InferenceOutcome};
use crate::InferenceClient;

const LOG_PREVIEW_LEN: usize = 100;

/// Body of a generate request. Text and image prompts share it; only `images` differs.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
}

impl<'a> GenerateRequest<'a> {
    pub(crate) fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            prompt,
            stream: false,
            images: None,
        }
    }

    /// Attaches one image as standard base64.
    pub(crate) fn with_image(mut self, image: &[u8]) -> Self {
        self.images
            .get_or_insert_with(Vec::new)
            .push(BASE64.encode(image));
        self
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// reqwest-based client for one configured endpoint and model.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

impl OllamaClient {
    /// Builds the HTTP client with the configured timeout.
    pub fn new(config: OllamaConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn generate(&self, request: GenerateRequest<'_>) -> InferenceOutcome {
        match self.send(&request).await {
            Ok(text) => InferenceOutcome::Success(text),
            Err(failure) => InferenceOutcome::Failure(failure),
        }
    }

    async fn send(&self, request: &GenerateRequest<'_>) -> Result<String, InferenceFailure> {
        let started = Instant::now();
        let response = self
            .client
            .post(&self.config.url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body_preview = %preview(&body),
                "Inference endpoint returned non-success status"
            );
            return Err(InferenceFailure::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let parsed: GenerateResponse = serde_json::from_slice(&body).map_err(|e| {
            error!(
                error = %e,
                body_preview = %preview(&String::from_utf8_lossy(&body)),
                "Inference response has no string `response` field"
            );
            InferenceFailure::Malformed
        })?;

        if parsed.response.trim().is_empty() {
            error!(model = %self.config.model, "Inference returned an empty completion");
            return Err(InferenceFailure::Empty);
        }

        info!(
            model = %self.config.model,
            latency_ms = started.elapsed().as_millis() as u64,
            response_len = parsed.response.len(),
            "Inference completed"
        );
        Ok(parsed.response)
    }

    /// Maps a transport error to a user-facing failure; the raw error only goes to the log.
    fn classify(&self, e: reqwest::Error) -> InferenceFailure {
        error!(error = %e, url = %self.config.url, "Inference request failed");
        if e.is_timeout() {
            InferenceFailure::Timeout(self.config.timeout.as_secs_f64().ceil() as u64)
        } else if e.is_decode() || e.is_body() {
            InferenceFailure::Malformed
        } else {
            InferenceFailure::Connect
        }
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    #[instrument(skip(self, prompt))]
    async fn generate_text(&self, prompt: &str) -> InferenceOutcome {
        info!(
            model = %self.config.model,
            prompt_preview = %preview(prompt),
            "Inference text request"
        );
        self.generate(GenerateRequest::new(&self.config.model, prompt))
            .await
    }

    #[instrument(skip(self, prompt, image))]
    async fn generate_from_image(&self, prompt: &str, image: &[u8]) -> InferenceOutcome {
        info!(
            model = %self.config.model,
            prompt_preview = %preview(prompt),
            image_bytes = image.len(),
            "Inference image request"
        );
        self.generate(GenerateRequest::new(&self.config.model, prompt).with_image(image))
            .await
    }
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_LEN).collect()
}
