//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use storage::ExchangeKind;

use crate::config::BotConfig;

#[derive(Parser, Debug)]
#[command(name = "vbot")]
#[command(about = "Telegram bot backed by a local Ollama model", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print stored exchanges, newest first (database from DATABASE_URL).
    History {
        #[arg(short, long, default_value = "20")]
        limit: i64,
        #[arg(long)]
        user_id: Option<i64>,
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
}

/// `--kind` values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Text,
    Photo,
}

impl From<KindArg> for ExchangeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Text => ExchangeKind::Text,
            KindArg::Photo => ExchangeKind::Photo,
        }
    }
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}
