//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the EduAuth application.
//! It provides the production adapters behind the core's collaborator traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL user repository using SQLx
//! - **Cache**: Redis client and the Redis-backed verification code store
//! - **Events**: Redis pub/sub publisher for account events
//! - **Email**: SMTP delivery using lettre
//! - **Security**: bcrypt password hashing

use ea_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and code storage
pub mod cache;

/// Email module - SMTP delivery
pub mod email;

/// Events module - message bus publishers
pub mod events;

/// Security module - password hashing
pub mod security;

pub use cache::{RedisClient, RedisVerificationCodeStore};
pub use database::{DatabasePool, MySqlUserRepository};
pub use email::SmtpEmailSender;
pub use events::RedisUserEventPublisher;
pub use security::BcryptPasswordHasher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A backend call exceeded its deadline
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Value could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Email delivery error
    #[error("Email error: {0}")]
    Email(String),

    /// Password hashing error
    #[error("Hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
