//! Shared error types

use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required setting: {key}")]
    Missing { key: String },

    #[error("Insecure setting {key}: {reason}")]
    Insecure { key: String, reason: String },
}

/// Result alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
