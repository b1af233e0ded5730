//! User repository trait defining the interface for user persistence.
//!
//! Durable storage lives outside the core; this is the narrow contract the
//! orchestrator consumes. Lookups return `Ok(None)` when nothing matches so
//! that the caller decides how absence is reported.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by email address (exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyExists))` - Email taken
    /// * `Err(DomainError)` - Storage failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace a stored user
    ///
    /// Fails with `AuthError::UserNotFound` when the id is unknown.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user by id, returning whether a row was removed
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
