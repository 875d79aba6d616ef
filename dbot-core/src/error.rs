use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    /// Relaying a message through the transport failed.
    #[error("Bot error: {0}")]
    Bot(String),

    /// Required configuration is missing or invalid; fatal at startup.
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DbotError>;
