//! Component factory: builds BotComponents from config. Isolates assembly logic from the runner.

use anyhow::Result;
use ollama_client::{InferenceClient, OllamaClient};
use std::sync::Arc;
use storage::ExchangeRepository;
use tracing::{error, info, instrument};
use vbot_core::{Dispatcher, TelegramBot};

use crate::config::BotConfig;

/// Everything the REPL needs.
pub struct BotComponents {
    pub repo: ExchangeRepository,
    pub teloxide_bot: teloxide::Bot,
    pub dispatcher: Dispatcher,
}

/// Opens the store, builds the Telegram and inference clients and wires the handlers.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let repo = ExchangeRepository::new(&config.database_url)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url,
                "Failed to initialize message storage"
            );
            anyhow::anyhow!("Failed to initialize message storage: {}", e)
        })?;

    let telegram = match config.telegram_api_url {
        Some(ref url) => TelegramBot::with_api_url(config.bot_token.clone(), url)?,
        None => TelegramBot::new(config.bot_token.clone()),
    };
    let teloxide_bot = telegram.inner().clone();

    let inference: Arc<dyn InferenceClient> = Arc::new(
        OllamaClient::new(config.ollama_config())
            .map_err(|e| anyhow::anyhow!("Failed to build inference client: {}", e))?,
    );
    info!(
        ollama_url = %config.ollama_url,
        model = %config.ollama_model,
        timeout_secs = config.ollama_timeout_secs,
        "Inference client ready"
    );

    let dispatcher = vbot_handlers::build_dispatcher(
        inference,
        Arc::new(telegram),
        repo.clone(),
        config.photo_tmp_dir.clone(),
    );

    Ok(BotComponents {
        repo,
        teloxide_bot,
        dispatcher,
    })
}
