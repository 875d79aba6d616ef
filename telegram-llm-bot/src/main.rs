//! telegram-llm-bot: loads `.env`, parses the CLI, and runs the bot.

use anyhow::Result;
use clap::Parser;
use telegram_llm_bot::{run_bot_with_llm, BotConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot_with_llm(config).await
        }
    }
}
