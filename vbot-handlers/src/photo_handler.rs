//! Photo handler: downloads the largest photo variant into a temp file, asks the model to describe
//! it, replies, stores the exchange. The temp file is removed before the handler returns, whatever
//! happened in between.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ollama_client::{error_reply, InferenceClient, InferenceOutcome};
use std::sync::Arc;
use storage::{ExchangeKind, ExchangeRepository, NewExchange};
use tempfile::TempPath;
use tracing::{error, info, instrument, warn};
use vbot_core::{
    Bot as CoreBot, DbotError, Handler, HandlerResponse, Message, MessageContent, PhotoVariant,
    Result,
};

/// Prompt sent with every photo.
pub const PHOTO_PROMPT: &str = "Describe what is depicted in the photo, in detail.";
/// Stored as `user_input` for photo exchanges.
pub const PHOTO_INPUT_PLACEHOLDER: &str = "[photo]";
/// Reason shown when the photo bytes could not be obtained.
pub const PHOTO_DOWNLOAD_FAILED: &str = "could not download the photo";

/// Claims [`MessageContent::Photo`] with at least one variant.
#[derive(Clone)]
pub struct PhotoHandler {
    inference: Arc<dyn InferenceClient>,
    bot: Arc<dyn CoreBot>,
    repo: ExchangeRepository,
    tmp_dir: PathBuf,
}

impl PhotoHandler {
    pub fn new(
        inference: Arc<dyn InferenceClient>,
        bot: Arc<dyn CoreBot>,
        repo: ExchangeRepository,
        tmp_dir: PathBuf,
    ) -> Self {
        Self {
            inference,
            bot,
            repo,
            tmp_dir,
        }
    }

    /// New empty temp file; deleted when the returned path is closed or dropped.
    fn create_buffer(&self) -> std::io::Result<TempPath> {
        Ok(tempfile::Builder::new()
            .prefix("vbot-photo-")
            .suffix(".jpg")
            .tempfile_in(&self.tmp_dir)?
            .into_temp_path())
    }

    async fn fetch(&self, photo: &PhotoVariant, buffer: &Path) -> Result<Vec<u8>> {
        self.bot.download_file(&photo.file_id, buffer).await?;
        let bytes = tokio::fs::read(buffer).await?;
        if bytes.is_empty() {
            return Err(DbotError::Bot(format!("file {} is empty", photo.file_id)));
        }
        Ok(bytes)
    }

    /// Produces the reply text: the model's description or an error line.
    async fn describe(&self, message: &Message, photo: &PhotoVariant, buffer: Option<&Path>) -> String {
        let Some(buffer) = buffer else {
            return error_reply(PHOTO_DOWNLOAD_FAILED);
        };
        let bytes = match self.fetch(photo, buffer).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, user_id = message.user.id, file_id = %photo.file_id, "Failed to fetch photo");
                return error_reply(PHOTO_DOWNLOAD_FAILED);
            }
        };

        info!(
            user_id = message.user.id,
            width = photo.width,
            height = photo.height,
            image_bytes = bytes.len(),
            "step: PhotoHandler calling inference"
        );
        let outcome = self.inference.generate_from_image(PHOTO_PROMPT, &bytes).await;
        if let InferenceOutcome::Failure(reason) = &outcome {
            warn!(user_id = message.user.id, reason = %reason, "Inference failed, replying with error");
        }
        outcome.reply_text()
    }
}

#[async_trait]
impl Handler for PhotoHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessageContent::Photo { variants, .. } = &message.content else {
            return Ok(HandlerResponse::Continue);
        };
        let Some(largest) = variants.last() else {
            return Ok(HandlerResponse::Continue);
        };

        let buffer = match self.create_buffer() {
            Ok(path) => Some(path),
            Err(e) => {
                error!(error = %e, tmp_dir = %self.tmp_dir.display(), "Failed to create photo buffer");
                None
            }
        };

        let reply = self.describe(message, largest, buffer.as_deref()).await;

        self.bot.reply_to(message, &reply).await?;
        info!(user_id = message.user.id, "step: PhotoHandler reply sent");

        let exchange = NewExchange::new(
            message.user.id,
            message.user.username.clone(),
            ExchangeKind::Photo,
            PHOTO_INPUT_PLACEHOLDER,
            reply.clone(),
        );
        self.repo.append(&exchange).await.map_err(|e| {
            error!(error = %e, user_id = message.user.id, "Failed to save exchange");
            DbotError::Database(e.to_string())
        })?;

        if let Some(buffer) = buffer {
            if let Err(e) = buffer.close() {
                warn!(error = %e, "Failed to remove photo buffer");
            }
        }

        Ok(HandlerResponse::Reply(reply))
    }
}
