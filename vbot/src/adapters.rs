//! teloxide → core conversions. Only text and photos get a meaningful [`MessageContent`]; anything
//! else maps to `Unsupported` and is ignored by the dispatcher.

use teloxide::types::PhotoSize;
use vbot_core::{Chat, Message, MessageContent, PhotoVariant, ToCoreMessage, ToCoreUser, User};

/// Telegram user → core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram message → core message.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: sender(self.0.from.as_ref()),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content: content_from_parts(self.0.text(), self.0.photo(), self.0.caption()),
            created_at: self.0.date,
        }
    }
}

/// Core user for the sender; channel posts and other sender-less updates map to user id 0.
fn sender(from: Option<&teloxide::types::User>) -> User {
    from.map(|u| TelegramUserWrapper(u).to_core())
        .unwrap_or(User {
            id: 0,
            username: None,
            first_name: None,
            last_name: None,
        })
}

/// Builds the content from the parts of a Telegram message. Text wins over photo; a photo keeps
/// Telegram's ascending size order.
pub fn content_from_parts(
    text: Option<&str>,
    photo: Option<&[PhotoSize]>,
    caption: Option<&str>,
) -> MessageContent {
    if let Some(text) = text {
        return MessageContent::from_text(text);
    }
    match photo {
        Some(sizes) if !sizes.is_empty() => MessageContent::Photo {
            variants: sizes.iter().map(photo_variant).collect(),
            caption: caption.map(str::to_string),
        },
        _ => MessageContent::Unsupported,
    }
}

fn photo_variant(size: &PhotoSize) -> PhotoVariant {
    PhotoVariant {
        file_id: size.file.id.to_string(),
        width: size.width,
        height: size.height,
        file_size: Some(size.file.size),
    }
}
