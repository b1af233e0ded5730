use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service_with_ttl(ttl: i64) -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        access_token_ttl_seconds: ttl,
        issuer: None,
    })
}

fn assert_invalid(result: Result<impl std::fmt::Debug, DomainError>) {
    match result {
        Err(DomainError::Token(TokenError::InvalidToken)) => {}
        other => panic!("expected InvalidToken, got {:?}", other),
    }
}

#[test]
fn test_round_trip() {
    let service = service_with_ttl(3600);
    for role in [Role::Admin, Role::Teacher, Role::Student] {
        let issued = service.generate("user-42", role).unwrap();
        let payload = service.validate(&issued.token).unwrap();

        assert_eq!(payload.user_id, "user-42");
        assert_eq!(payload.role, role);
        assert_eq!(payload.expires_at, issued.issued_at.timestamp() + 3600);
        assert_eq!(payload.issued_at, issued.issued_at);
    }
}

#[test]
fn test_zero_ttl_is_rejected() {
    let service = service_with_ttl(0);
    let issued = service.generate("user-1", Role::Student).unwrap();
    assert_invalid(service.validate(&issued.token));
}

#[test]
fn test_validation_after_expiry() {
    let service = service_with_ttl(60);
    let now = Utc::now().timestamp();
    let issued = service.generate_at("user-1", Role::Teacher, now).unwrap();

    assert!(service.validate_at(&issued.token, now + 59).is_ok());
    assert_invalid(service.validate_at(&issued.token, now + 60));
}

#[test]
fn test_token_issued_in_the_past_is_expired() {
    let service = service_with_ttl(60);
    let issued = service
        .generate_at("user-1", Role::Student, Utc::now().timestamp() - 3600)
        .unwrap();
    assert_invalid(service.validate(&issued.token));
}

#[test]
fn test_tampered_signature_is_rejected() {
    let service = service_with_ttl(3600);
    let token = service.generate("user-1", Role::Admin).unwrap().token;

    let signature_start = token.rfind('.').unwrap() + 1;
    let mut bytes = token.into_bytes();
    let idx = signature_start + 5;
    bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    assert_invalid(service.validate(&tampered));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let issuer = service_with_ttl(3600);
    let verifier = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..TokenServiceConfig::default()
    });
    let token = issuer.generate("user-1", Role::Student).unwrap().token;

    assert_invalid(verifier.validate(&token));
}

#[test]
fn test_algorithm_mismatch_is_rejected() {
    let service = service_with_ttl(3600);
    let now = Utc::now().timestamp();
    let claims = json!({ "sub": "user-1", "role": "admin", "iat": now, "exp": now + 3600 });
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();

    assert_invalid(service.validate(&token));
}

#[test]
fn test_missing_or_mistyped_claims_are_rejected() {
    let service = service_with_ttl(3600);
    let key = EncodingKey::from_secret(b"test-secret");
    let now = Utc::now().timestamp();

    let cases = vec![
        json!({ "role": "admin", "iat": now, "exp": now + 3600 }),
        json!({ "sub": "user-1", "iat": now, "exp": now + 3600 }),
        json!({ "sub": "user-1", "role": "admin", "iat": now }),
        json!({ "sub": "user-1", "role": "principal", "iat": now, "exp": now + 3600 }),
        json!({ "sub": "user-1", "role": "unspecified", "iat": now, "exp": now + 3600 }),
        json!({ "sub": 42, "role": "admin", "iat": now, "exp": now + 3600 }),
        json!({ "sub": "user-1", "role": "admin", "iat": now, "exp": "later" }),
    ];

    for claims in cases {
        let token = encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();
        assert_invalid(service.validate(&token));
    }
}

#[test]
fn test_garbage_is_rejected() {
    let service = service_with_ttl(3600);
    assert_invalid(service.validate(""));
    assert_invalid(service.validate("not.a.token"));
}

#[test]
fn test_issuer_is_enforced_when_configured() {
    let with_issuer = TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        access_token_ttl_seconds: 3600,
        issuer: Some("eduauth".to_string()),
    });
    let without_issuer = service_with_ttl(3600);

    let token = with_issuer.generate("user-1", Role::Student).unwrap().token;
    assert!(with_issuer.validate(&token).is_ok());

    let foreign = without_issuer.generate("user-1", Role::Student).unwrap().token;
    assert_invalid(with_issuer.validate(&foreign));
}

#[test]
fn test_issuer_claim_is_required_when_configured() {
    let service = TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        access_token_ttl_seconds: 3600,
        issuer: Some("eduauth".to_string()),
    });
    let key = EncodingKey::from_secret(b"test-secret");
    let now = Utc::now().timestamp();

    let missing = json!({ "sub": "user-1", "role": "admin", "iat": now, "exp": now + 3600 });
    let token = encode(&Header::new(Algorithm::HS256), &missing, &key).unwrap();
    assert_invalid(service.validate(&token));

    let wrong = json!({
        "sub": "user-1", "role": "admin", "iat": now, "exp": now + 3600, "iss": "someone-else"
    });
    let token = encode(&Header::new(Algorithm::HS256), &wrong, &key).unwrap();
    assert_invalid(service.validate(&token));
}
