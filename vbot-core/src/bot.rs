//! Bot abstraction for sending replies and fetching attachments.
//!
//! [`Bot`] trait is transport-agnostic; [`TelegramBot`] implements it via teloxide.

use std::path::Path;

use crate::error::{DbotError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;
use teloxide::{net::Download, prelude::*, types::ChatId, types::FileId};
use tracing::debug;

/// Telegram rejects texts above 4096 characters; stay below that with some headroom.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Outbound side of the transport. Handlers only talk to the platform through this trait.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Downloads the file with the transport id `file_id` into `dst`, overwriting it.
    async fn download_file(&self, file_id: &str, dst: &Path) -> Result<()>;
}

/// Teloxide-based implementation of [`Bot`].
#[derive(Clone)]
pub struct TelegramBot {
    bot: teloxide::Bot,
}

impl TelegramBot {
    /// Creates a bot using the given Telegram bot token.
    pub fn new(token: String) -> Self {
        Self {
            bot: teloxide::Bot::new(token),
        }
    }

    /// Creates a bot whose requests go to `api_url` instead of api.telegram.org.
    pub fn with_api_url(token: String, api_url: &str) -> Result<Self> {
        let url = reqwest::Url::parse(api_url)
            .map_err(|e| DbotError::Bot(format!("Invalid Telegram API URL {}: {}", api_url, e)))?;
        Ok(Self {
            bot: teloxide::Bot::new(token).set_api_url(url),
        })
    }

    /// Returns the underlying teloxide::Bot for the update loop.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl Bot for TelegramBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        for part in split_message(text, MAX_MESSAGE_CHARS) {
            self.bot
                .send_message(ChatId(chat.id), part)
                .await
                .map_err(|e| DbotError::Bot(e.to_string()))?;
        }
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn download_file(&self, file_id: &str, dst: &Path) -> Result<()> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        debug!(file_id = %file_id, size = file.size, "Downloading file");

        let mut out = tokio::fs::File::create(dst).await?;
        self.bot
            .download_file(&file.path, &mut out)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}

/// Splits `text` into parts of at most `max_chars` characters, preferring to cut after a newline.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest: Vec<char> = text.chars().collect();
    while rest.len() > max_chars {
        let window = &rest[..max_chars];
        let cut = window
            .iter()
            .rposition(|c| *c == '\n')
            .map(|i| i + 1)
            .filter(|i| *i > max_chars / 2)
            .unwrap_or(max_chars);
        parts.push(rest[..cut].iter().collect());
        rest.drain(..cut);
    }
    if !rest.is_empty() || parts.is_empty() {
        parts.push(rest.into_iter().collect());
    }
    parts
}
