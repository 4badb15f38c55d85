//! Text handler: relays plain text to the inference endpoint, replies, then stores the exchange.

use async_trait::async_trait;
use ollama_client::{InferenceClient, InferenceOutcome};
use std::sync::Arc;
use storage::{ExchangeKind, ExchangeRepository, NewExchange};
use tracing::{error, info, instrument, warn};
use vbot_core::{
    Bot as CoreBot, DbotError, Handler, HandlerResponse, Message, MessageContent, Result,
};

/// Claims [`MessageContent::Text`]. Reply is sent only after inference returns and the row is
/// written only after the reply went out.
#[derive(Clone)]
pub struct TextHandler {
    inference: Arc<dyn InferenceClient>,
    bot: Arc<dyn CoreBot>,
    repo: ExchangeRepository,
}

impl TextHandler {
    pub fn new(
        inference: Arc<dyn InferenceClient>,
        bot: Arc<dyn CoreBot>,
        repo: ExchangeRepository,
    ) -> Self {
        Self {
            inference,
            bot,
            repo,
        }
    }
}

#[async_trait]
impl Handler for TextHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessageContent::Text(text) = &message.content else {
            return Ok(HandlerResponse::Continue);
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            text_len = text.len(),
            "step: TextHandler calling inference"
        );
        let outcome = self.inference.generate_text(text).await;
        if let InferenceOutcome::Failure(reason) = &outcome {
            warn!(user_id = message.user.id, reason = %reason, "Inference failed, replying with error");
        }
        let reply = outcome.reply_text();

        self.bot.reply_to(message, &reply).await?;
        info!(user_id = message.user.id, "step: TextHandler reply sent");

        let exchange = NewExchange::new(
            message.user.id,
            message.user.username.clone(),
            ExchangeKind::Text,
            text.clone(),
            reply.clone(),
        );
        self.repo.append(&exchange).await.map_err(|e| {
            error!(error = %e, user_id = message.user.id, "Failed to save exchange");
            DbotError::Database(e.to_string())
        })?;

        Ok(HandlerResponse::Reply(reply))
    }
}
