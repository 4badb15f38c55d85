use anyhow::Result;
use clap::Parser;
use storage::ExchangeQuery;
use vbot::{load_config, print_history, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::History {
            limit,
            user_id,
            kind,
        } => {
            let database_url = vbot::config::database_url_from_env();
            let query = ExchangeQuery {
                user_id,
                message_type: kind.map(Into::into),
                limit: Some(limit),
            };
            print_history(&database_url, &query).await
        }
    }
}
