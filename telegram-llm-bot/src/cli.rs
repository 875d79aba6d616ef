//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "telegram-llm-bot")]
#[command(about = "Telegram bot backed by OpenAI or MistralAI", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["telegram-llm-bot", "run", "--token", "abc"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Run {
                token: Some("abc".to_string())
            }
        );
    }

    #[test]
    fn test_parse_run_without_token() {
        let cli = Cli::try_parse_from(["telegram-llm-bot", "run"]).unwrap();
        assert_eq!(cli.command, Commands::Run { token: None });
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["telegram-llm-bot"]).is_err());
    }
}
