use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the calculation, configuration and presentation layers.
#[derive(Debug, Error)]
pub enum ProrationError {
    #[error("Invalid settlement date: {0}")]
    InvalidDate(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, ProrationError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ProrationError),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Line editor failed: {0}")]
    Editor(String),
}

impl From<std::io::Error> for ProrationError {
    fn from(err: std::io::Error) -> Self {
        ProrationError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for ProrationError {
    fn from(err: serde_json::Error) -> Self {
        ProrationError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(ProrationError::from(err))
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Editor(err.to_string())
    }
}
