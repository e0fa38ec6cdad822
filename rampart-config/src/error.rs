// Error types for validation configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl From<ConfigError> for rampart_core::Error {
    fn from(error: ConfigError) -> Self {
        rampart_core::Error::Internal(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
