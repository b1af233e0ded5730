//! Error types for authentication, token handling and one-time codes

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("New password must differ from the old one")]
    PasswordUnchanged,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Invalid role")]
    InvalidRole,
}

/// Token errors
///
/// Validation deliberately has a single failure kind: callers never learn
/// whether a token was expired, malformed or forged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
}

/// One-time code errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Verification code not found")]
    CodeNotFound,

    #[error("Invalid verification code")]
    CodeInvalid,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Verification code issued for another purpose")]
    InvalidPurpose,
}
