//! Test doubles shared by the handler tests: a recording [`Bot`] and a canned [`InferenceClient`].

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use ollama_client::{InferenceClient, InferenceOutcome};
use vbot_core::{Bot, Chat, DbotError, Message, MessageContent, PhotoVariant, Result, User};

/// Bytes written by [`MockBot::download_file`].
pub const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// Mock Bot: records replies and downloads, writes [`FAKE_JPEG`] on download.
#[derive(Default)]
pub struct MockBot {
    pub replies: Mutex<Vec<(i64, String)>>,
    /// (file_id, destination) for every download call.
    pub downloads: Mutex<Vec<(String, PathBuf)>>,
    pub fail_download: bool,
    pub fail_send: bool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_download() -> Self {
        Self {
            fail_download: true,
            ..Self::default()
        }
    }

    pub fn failing_send() -> Self {
        Self {
            fail_send: true,
            ..Self::default()
        }
    }

    pub fn replies(&self) -> Vec<(i64, String)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<(String, PathBuf)> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.fail_send {
            return Err(DbotError::Bot("Forbidden: bot was blocked by the user".to_string()));
        }
        self.replies.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn download_file(&self, file_id: &str, dst: &Path) -> Result<()> {
        self.downloads
            .lock()
            .unwrap()
            .push((file_id.to_string(), dst.to_path_buf()));
        assert!(dst.exists(), "buffer must exist while downloading");
        if self.fail_download {
            return Err(DbotError::Bot("file is too big".to_string()));
        }
        tokio::fs::write(dst, FAKE_JPEG).await?;
        Ok(())
    }
}

/// Inference stub returning a fixed outcome and recording (prompt, image length) per call.
pub struct StubInference {
    outcome: InferenceOutcome,
    pub calls: Mutex<Vec<(String, Option<usize>)>>,
}

impl StubInference {
    pub fn new(outcome: InferenceOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Option<usize>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for StubInference {
    async fn generate_text(&self, prompt: &str) -> InferenceOutcome {
        self.calls.lock().unwrap().push((prompt.to_string(), None));
        self.outcome.clone()
    }

    async fn generate_from_image(&self, prompt: &str, image: &[u8]) -> InferenceOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), Some(image.len())));
        self.outcome.clone()
    }
}

pub fn alice() -> User {
    User {
        id: 1001,
        username: Some("alice".to_string()),
        first_name: Some("Alice".to_string()),
        last_name: None,
    }
}

pub fn message_from(user: User, content: MessageContent) -> Message {
    Message {
        id: "77".to_string(),
        chat: Chat {
            id: user.id,
            chat_type: "private".to_string(),
        },
        user,
        content,
        created_at: Utc::now(),
    }
}

/// Photo message with three ascending size variants; the last one is the largest.
pub fn photo_message(user: User) -> Message {
    let variants = [(90, 67, "small"), (320, 240, "medium"), (1280, 960, "large")]
        .into_iter()
        .map(|(width, height, id)| PhotoVariant {
            file_id: id.to_string(),
            width,
            height,
            file_size: Some(width * height / 10),
        })
        .collect();
    message_from(
        user,
        MessageContent::Photo {
            variants,
            caption: None,
        },
    )
}
