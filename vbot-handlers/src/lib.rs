//! Handlers for the three kinds of inbound messages, plus [`build_dispatcher`] which wires them in
//! priority order: command, then text, then photo.

mod command_handler;
mod photo_handler;
mod text_handler;

use std::path::PathBuf;
use std::sync::Arc;

use ollama_client::InferenceClient;
use storage::ExchangeRepository;
use vbot_core::{Bot, Dispatcher};

pub use command_handler::{CommandHandler, HELP_MESSAGE, WELCOME_MESSAGE};
pub use photo_handler::{PhotoHandler, PHOTO_DOWNLOAD_FAILED, PHOTO_INPUT_PLACEHOLDER, PHOTO_PROMPT};
pub use text_handler::TextHandler;

/// Builds the dispatcher used in production: command → text → photo.
pub fn build_dispatcher(
    inference: Arc<dyn InferenceClient>,
    bot: Arc<dyn Bot>,
    repo: ExchangeRepository,
    photo_tmp_dir: PathBuf,
) -> Dispatcher {
    Dispatcher::new()
        .add_handler(Arc::new(CommandHandler::new(bot.clone())))
        .add_handler(Arc::new(TextHandler::new(
            inference.clone(),
            bot.clone(),
            repo.clone(),
        )))
        .add_handler(Arc::new(PhotoHandler::new(
            inference,
            bot,
            repo,
            photo_tmp_dir,
        )))
}
