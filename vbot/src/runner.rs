//! REPL runner: converts teloxide messages to core messages and hands each one to the dispatcher
//! in its own task, so a slow model never blocks polling.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, instrument};
use vbot_core::{init_tracing, mask_token, Dispatcher, HandlerResponse, ToCoreMessage};

use crate::adapters::TelegramMessageWrapper;
use crate::components::build_bot_components;
use crate::config::BotConfig;

/// Main entry: validate config, init logging, build components, then run the REPL until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        token = %mask_token(&config.bot_token),
        database_url = %config.database_url,
        ollama_url = %config.ollama_url,
        model = %config.ollama_model,
        photo_tmp_dir = %config.photo_tmp_dir.display(),
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    info!(
        handlers = components.dispatcher.len(),
        "Bot started successfully"
    );

    run_repl(components.teloxide_bot, components.dispatcher).await
}

/// Starts the REPL. Each message is converted and dispatched in a spawned task; errors are logged
/// and never stop the loop.
#[instrument(skip(bot, dispatcher))]
pub async fn run_repl(bot: teloxide::Bot, dispatcher: Dispatcher) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Connected to Telegram");
        }
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let dispatcher = dispatcher.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                kind = core_msg.content.kind(),
                "Received message"
            );

            tokio::spawn(async move {
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_id = %core_msg.id,
                    "step: processing message"
                );
                match dispatcher.dispatch(&core_msg).await {
                    Ok(HandlerResponse::Reply(_)) => {
                        info!(user_id = core_msg.user.id, "step: message handled")
                    }
                    Ok(HandlerResponse::Continue) => {}
                    Err(e) => {
                        error!(error = %e, user_id = core_msg.user.id, "Message handling failed")
                    }
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
