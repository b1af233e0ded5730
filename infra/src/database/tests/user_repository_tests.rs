use ea_core::domain::entities::user::Role;
use ea_core::errors::DomainError;

use crate::database::mysql::user_repository_impl::{is_duplicate_key, parse_role};

#[test]
fn test_parse_role_accepts_stored_names() {
    assert_eq!(parse_role("admin").unwrap(), Role::Admin);
    assert_eq!(parse_role("teacher").unwrap(), Role::Teacher);
    assert_eq!(parse_role("student").unwrap(), Role::Student);
}

#[test]
fn test_parse_role_rejects_corrupt_value() {
    let err = parse_role("unspecified").unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
}

#[test]
fn test_non_database_error_is_not_duplicate() {
    assert!(!is_duplicate_key(&sqlx::Error::RowNotFound));
    assert!(!is_duplicate_key(&sqlx::Error::PoolTimedOut));
}
