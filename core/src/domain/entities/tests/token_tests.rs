use crate::domain::entities::token::{Claims, TokenPayload};
use crate::domain::entities::user::Role;

#[test]
fn test_claims_expiry_window() {
    let claims = Claims::new("user-1", Role::Student, 1_000, 60);

    assert_eq!(claims.exp, 1_060);
    assert!(!claims.is_expired_at(1_059));
    assert!(claims.is_expired_at(1_060));
    assert!(claims.is_expired_at(2_000));
}

#[test]
fn test_zero_ttl_claims_are_expired_immediately() {
    let claims = Claims::new("user-1", Role::Admin, 1_000, 0);
    assert!(claims.is_expired_at(1_000));
}

#[test]
fn test_payload_from_claims() {
    let claims = Claims::new("user-7", Role::Teacher, 1_700_000_000, 3600);
    let payload = TokenPayload::from_claims(&claims).with_email("t@school.edu");

    assert_eq!(payload.user_id, "user-7");
    assert_eq!(payload.role, Role::Teacher);
    assert_eq!(payload.issued_at.timestamp(), 1_700_000_000);
    assert_eq!(payload.expires_at, 1_700_003_600);
    assert_eq!(payload.email, "t@school.edu");
    assert!(!payload.is_admin());
}

#[test]
fn test_claims_serialize_role_as_string() {
    let claims = Claims::new("u", Role::Admin, 10, 10);
    let value = serde_json::to_value(&claims).unwrap();

    assert_eq!(value["role"], "admin");
    assert_eq!(value["sub"], "u");
    assert!(value.get("iss").is_none());
}
