//! Translation of domain errors into gRPC statuses.
//!
//! This is the only place domain errors become statuses. Messages are short
//! and fixed; internal failure details are logged and never returned.

use tonic::Status;

use ea_core::errors::{AuthError, CodeError, DomainError, TokenError};
use ea_shared::config::DuplicateEmailStatus;

/// Message shared by every one-time code failure
pub const INVALID_CODE_MESSAGE: &str = "invalid or expired code";

/// Maps a domain error using the default duplicate email policy
pub fn domain_status(err: DomainError) -> Status {
    StatusMapper::default().map(err)
}

/// Error mapper carrying the boundary policies that are configurable
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusMapper {
    duplicate_email: DuplicateEmailStatus,
}

impl StatusMapper {
    pub fn new(duplicate_email: DuplicateEmailStatus) -> Self {
        Self { duplicate_email }
    }

    pub fn map(&self, err: DomainError) -> Status {
        match err {
            DomainError::Auth(auth) => self.map_auth(auth),
            DomainError::Token(TokenError::InvalidToken) => Status::unauthenticated("invalid token"),
            DomainError::Token(TokenError::TokenGenerationFailed(reason)) => {
                tracing::error!(error = %reason, "Token signing failed");
                Status::internal("internal error")
            }
            DomainError::Code(code) => {
                // Which check failed stays server-side
                tracing::info!(reason = %code, "Code rejected");
                match code {
                    CodeError::CodeNotFound
                    | CodeError::CodeInvalid
                    | CodeError::CodeExpired
                    | CodeError::InvalidPurpose => Status::invalid_argument(INVALID_CODE_MESSAGE),
                }
            }
            DomainError::Validation { message } => Status::invalid_argument(message),
            DomainError::Internal { message } => {
                tracing::error!(error = %message, "Internal failure");
                Status::internal("internal error")
            }
        }
    }

    fn map_auth(&self, err: AuthError) -> Status {
        match err {
            AuthError::EmailAlreadyExists => match self.duplicate_email {
                DuplicateEmailStatus::AlreadyExists => {
                    Status::already_exists("email already registered")
                }
                DuplicateEmailStatus::Internal => Status::internal("failed to register user"),
            },
            AuthError::UserNotFound => Status::not_found("user not found"),
            AuthError::InvalidCredentials => {
                Status::permission_denied("current password is incorrect")
            }
            AuthError::PasswordUnchanged => {
                Status::invalid_argument("new password must differ from the old one")
            }
            AuthError::PermissionDenied => Status::permission_denied("permission denied"),
            AuthError::InvalidRole => Status::invalid_argument("invalid role"),
        }
    }
}
