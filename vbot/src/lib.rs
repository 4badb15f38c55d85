//! # vbot
//!
//! Application crate: loads [`BotConfig`] from env, wires storage, the Ollama client and the handlers
//! into a [`vbot_core::Dispatcher`], and runs the teloxide REPL. Also hosts the `history` command.

pub mod adapters;
pub mod cli;
pub mod components;
pub mod config;
pub mod history;
pub mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use cli::{load_config, Cli, Commands, KindArg};
pub use components::{build_bot_components, BotComponents};
pub use config::BotConfig;
pub use history::{format_record, print_history};
pub use runner::run_bot;
