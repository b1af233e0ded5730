//! Collaborator traits used by the authentication service

use async_trait::async_trait;

use crate::domain::events::UserRegisteredEvent;
use crate::errors::DomainError;

/// One-way salted password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plain-text password against a stored hash
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Message-bus publisher for account events
#[async_trait]
pub trait UserEventPublisher: Send + Sync {
    async fn publish_user_registered(&self, event: &UserRegisteredEvent) -> Result<(), DomainError>;
}
