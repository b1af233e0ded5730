//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, CodeError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
///
/// Collaborators (storage, cache, hashing, email) report failures as
/// `Internal`; the message is for server-side logs only.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Code(#[from] CodeError),
}

impl DomainError {
    /// Shorthand for wrapping a collaborator failure
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
