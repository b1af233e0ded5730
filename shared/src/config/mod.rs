//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, verification code lifetimes and account rules
//! - `cache` - Redis configuration
//! - `database` - Database connection, pool configuration and storage backend
//! - `email` - Outbound SMTP configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - gRPC server configuration and the public method list
//!
//! Every section is read through a lookup function so tests can supply
//! values without touching the process environment.

pub mod auth;
pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};

// Re-export commonly used types
pub use auth::{AuthConfig, DuplicateEmailStatus, JwtConfig, VerificationCodeConfig};
pub use cache::CacheConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Source of raw configuration values, keyed by variable name
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read and parse a value, falling back to `default` when it is unset.
/// A set but unparsable value is an error rather than a silent default.
pub(crate) fn parse_or<T: FromStr>(lookup: Lookup<'_>, key: &str, default: T) -> ConfigResult<T> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        _ => Ok(default),
    }
}

/// Read a string value, falling back to `default` when it is unset
pub(crate) fn string_or(lookup: Lookup<'_>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse boolean flags leniently (`true/false`, `1/0`, `yes/no`, `on/off`)
pub(crate) fn bool_or(lookup: Lookup<'_>, key: &str, default: bool) -> ConfigResult<bool> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
        },
        _ => Ok(default),
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Which storage adapters to wire
    pub storage: StorageBackend,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Outbound email configuration
    pub email: EmailConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            storage: StorageBackend::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source
    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let environment = parse_or(lookup, "APP_ENV", Environment::Development)?;
        let auth = AuthConfig::from_lookup(lookup)?;

        if environment.is_production() && auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Insecure {
                key: "JWT_SECRET".to_string(),
                reason: "the development secret cannot be used in production".to_string(),
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(lookup)?,
            storage: parse_or(lookup, "STORAGE_BACKEND", StorageBackend::default())?,
            database: DatabaseConfig::from_lookup(lookup)?,
            auth,
            cache: CacheConfig::from_lookup(lookup)?,
            email: EmailConfig::from_lookup(lookup)?,
            logging: LoggingConfig::from_lookup(lookup, environment)?,
        })
    }
}
