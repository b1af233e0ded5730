//! Shared utilities and common types for the EduAuth server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Configuration error type
//! - Validation and masking helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, DuplicateEmailStatus, EmailConfig,
    Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig, StorageBackend,
    VerificationCodeConfig,
};
pub use errors::{ConfigError, ConfigResult};
pub use utils::{masking, validation};
