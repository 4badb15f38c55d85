//! # vbot-core
//!
//! Core types and traits for the bot: [`Bot`], [`Handler`], [`Dispatcher`], message and user types,
//! and tracing initialization. Transport-agnostic apart from [`TelegramBot`]; used by vbot-handlers and vbot.

pub mod bot;
pub mod dispatcher;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{split_message, Bot, TelegramBot, MAX_MESSAGE_CHARS};
pub use dispatcher::Dispatcher;
pub use error::{DbotError, Result};
pub use logger::{init_tracing, mask_token};
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageContent, PhotoVariant, ToCoreMessage,
    ToCoreUser, User,
};
