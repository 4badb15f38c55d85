//! Command handler: static replies for `/start` and `/help`. No inference, nothing stored.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};
use vbot_core::{Bot as CoreBot, Handler, HandlerResponse, Message, MessageContent, Result};

pub const WELCOME_MESSAGE: &str =
    "Hi! Send me a question or a photo and I will answer with the help of a local AI model.";

pub const HELP_MESSAGE: &str = "Send any text to get an answer from the AI model.\n\
Send a photo to get a detailed description of what is on it.\n\
\n\
/start - greeting\n\
/help - this message";

/// Replies to known commands; unknown commands are left unclaimed.
#[derive(Clone)]
pub struct CommandHandler {
    bot: Arc<dyn CoreBot>,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn CoreBot>) -> Self {
        Self { bot }
    }

    fn reply_for(name: &str) -> Option<&'static str> {
        match name {
            "start" => Some(WELCOME_MESSAGE),
            "help" => Some(HELP_MESSAGE),
            _ => None,
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessageContent::Command { name, .. } = &message.content else {
            return Ok(HandlerResponse::Continue);
        };
        let Some(reply) = Self::reply_for(name) else {
            return Ok(HandlerResponse::Continue);
        };

        info!(
            user_id = message.user.id,
            user = %message.user.display_name(),
            command = %name,
            "step: CommandHandler replying"
        );
        self.bot.reply_to(message, reply).await?;
        Ok(HandlerResponse::Reply(reply.to_string()))
    }
}
