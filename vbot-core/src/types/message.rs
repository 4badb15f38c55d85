//! Message and content types for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// One size variant of a photo as offered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoVariant {
    /// Transport file id used to download the bytes.
    pub file_id: String,
    pub width: u32,
    pub height: u32,
    pub file_size: Option<u32>,
}

/// Payload of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    /// `/name args`; `name` is lowercase without the slash and without any `@botname` suffix.
    Command { name: String, args: String },
    /// Plain text that is not a command.
    Text(String),
    /// Photo sizes in transport order (ascending, the last one is the largest).
    Photo {
        variants: Vec<PhotoVariant>,
        caption: Option<String>,
    },
    /// Anything else (stickers, voice, service messages, ...).
    Unsupported,
}

impl MessageContent {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageContent::Command { .. } => "command",
            MessageContent::Text(_) => "text",
            MessageContent::Photo { .. } => "photo",
            MessageContent::Unsupported => "unsupported",
        }
    }

    /// Parses raw text into [`MessageContent::Command`] when it starts with `/`, otherwise [`MessageContent::Text`].
    pub fn from_text(text: &str) -> Self {
        let Some(rest) = text.strip_prefix('/') else {
            return MessageContent::Text(text.to_string());
        };
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let name = head.split('@').next().unwrap_or_default().to_lowercase();
        if name.is_empty() {
            return MessageContent::Text(text.to_string());
        }
        MessageContent::Command {
            name,
            args: args.to_string(),
        }
    }
}

/// A single inbound message with user, chat and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}
