use crate::errors::{AuthError, CodeError, DomainError, TokenError};

#[test]
fn test_transparent_display() {
    let err: DomainError = AuthError::UserNotFound.into();
    assert_eq!(err.to_string(), "User not found");

    let err: DomainError = TokenError::InvalidToken.into();
    assert_eq!(err.to_string(), "Invalid token");

    let err: DomainError = CodeError::InvalidPurpose.into();
    assert_eq!(err.to_string(), "Verification code issued for another purpose");
}

#[test]
fn test_from_conversions_keep_variant() {
    let err: DomainError = CodeError::CodeExpired.into();
    assert!(matches!(err, DomainError::Code(CodeError::CodeExpired)));

    let err: DomainError = AuthError::EmailAlreadyExists.into();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyExists)));
}

#[test]
fn test_helpers() {
    let err = DomainError::internal("redis timeout");
    assert_eq!(err.to_string(), "Internal error: redis timeout");

    let err = DomainError::validation("email is malformed");
    assert!(matches!(err, DomainError::Validation { .. }));
}
