//! Error types for the consensus service

use thiserror::Error;

/// Result type for consensus service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur in the consensus service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] ::config::ConfigError),

    #[error("Ranking fetch failed: {0}")]
    SourceFetch(String),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
