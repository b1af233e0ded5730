use tonic::Code;

use ea_core::errors::{AuthError, CodeError, DomainError, TokenError};
use ea_shared::config::DuplicateEmailStatus;

use crate::handlers::error::{StatusMapper, INVALID_CODE_MESSAGE};
use crate::handlers::domain_status;

#[test]
fn test_code_errors_share_one_status() {
    for err in [
        CodeError::CodeNotFound,
        CodeError::CodeInvalid,
        CodeError::CodeExpired,
        CodeError::InvalidPurpose,
    ] {
        let status = domain_status(err.into());
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), INVALID_CODE_MESSAGE);
    }
}

#[test]
fn test_duplicate_email_follows_policy() {
    let err = || DomainError::Auth(AuthError::EmailAlreadyExists);

    let status = StatusMapper::new(DuplicateEmailStatus::AlreadyExists).map(err());
    assert_eq!(status.code(), Code::AlreadyExists);

    let status = StatusMapper::new(DuplicateEmailStatus::Internal).map(err());
    assert_eq!(status.code(), Code::Internal);
}

#[test]
fn test_internal_details_are_not_exposed() {
    let status = domain_status(DomainError::internal("mysql: connection refused at 10.0.0.5"));

    assert_eq!(status.code(), Code::Internal);
    assert!(!status.message().contains("mysql"));
}

#[test]
fn test_auth_error_statuses() {
    assert_eq!(domain_status(AuthError::UserNotFound.into()).code(), Code::NotFound);
    assert_eq!(domain_status(AuthError::PermissionDenied.into()).code(), Code::PermissionDenied);
    assert_eq!(domain_status(AuthError::InvalidRole.into()).code(), Code::InvalidArgument);
    assert_eq!(domain_status(AuthError::PasswordUnchanged.into()).code(), Code::InvalidArgument);
    assert_eq!(domain_status(TokenError::InvalidToken.into()).code(), Code::Unauthenticated);
}

#[test]
fn test_validation_message_is_passed_through() {
    let status = domain_status(DomainError::validation("email address is malformed"));

    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "email address is malformed");
}
