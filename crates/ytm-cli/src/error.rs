//! CLI error types.

use thiserror::Error;

use ytm_bonds::BondError;
use ytm_config::{ConfigError, ValidationError};

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// One or more bond inputs failed validation.
    #[error("Invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(ConfigError),

    /// Calculation error.
    #[error("Calculation error: {0}")]
    Calculation(#[from] BondError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let errors = err.validation_errors();
        if errors.is_empty() {
            CliError::Config(err)
        } else {
            CliError::InvalidInput(errors)
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
