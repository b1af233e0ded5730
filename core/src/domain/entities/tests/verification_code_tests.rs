use chrono::{Duration, Utc};

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};

#[test]
fn test_new_code_expiry() {
    let code = VerificationCode::new(
        "user-1".to_string(),
        "123456".to_string(),
        CodePurpose::ResetPassword,
        600,
    );

    assert!(!code.is_expired());
    let remaining = code.remaining_seconds();
    assert!(remaining > 590 && remaining <= 600);
}

#[test]
fn test_expiry_boundary_fails_closed() {
    let code = VerificationCode::new(
        "user-1".to_string(),
        "123456".to_string(),
        CodePurpose::EmailVerification,
        300,
    );

    assert!(code.is_expired_at(code.expires_at));
    assert!(code.is_expired_at(code.expires_at + Duration::seconds(1)));
    assert!(!code.is_expired_at(code.expires_at - Duration::seconds(1)));
}

#[test]
fn test_expired_code_has_no_remaining_time() {
    let mut code = VerificationCode::new(
        "user-1".to_string(),
        "123456".to_string(),
        CodePurpose::EmailVerification,
        300,
    );
    code.expires_at = Utc::now() - Duration::seconds(5);

    assert!(code.is_expired());
    assert_eq!(code.remaining_seconds(), 0);
}

#[test]
fn test_purpose_strings() {
    assert_eq!(CodePurpose::EmailVerification.as_str(), "email_verification");
    assert_eq!(CodePurpose::ResetPassword.to_string(), "reset_password");
    assert_eq!(
        "reset_password".parse::<CodePurpose>().unwrap(),
        CodePurpose::ResetPassword
    );
    assert!("login".parse::<CodePurpose>().is_err());

    let json = serde_json::to_string(&CodePurpose::EmailVerification).unwrap();
    assert_eq!(json, "\"email_verification\"");
}
