//! Unit tests for verification service

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::user::{Role, User};
use crate::domain::entities::verification_code::{CodePurpose, VerificationCode, CODE_LENGTH};
use crate::errors::{CodeError, DomainError};
use crate::services::verification::{
    InMemoryCodeStore, RecordingEmailSender, VerificationService, VerificationServiceConfig,
};

struct Fixture {
    store: Arc<InMemoryCodeStore>,
    email: Arc<RecordingEmailSender>,
    service: VerificationService<InMemoryCodeStore, RecordingEmailSender>,
    user: User,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryCodeStore::new());
    let email = Arc::new(RecordingEmailSender::new());
    let service = VerificationService::new(
        store.clone(),
        email.clone(),
        VerificationServiceConfig::default(),
    );
    let user = User::new("pupil@school.edu".to_string(), "hash".to_string(), Role::Student);
    Fixture {
        store,
        email,
        service,
        user,
    }
}

fn assert_code_error(result: Result<VerificationCode, DomainError>, expected: CodeError) {
    match result {
        Err(DomainError::Code(actual)) => assert_eq!(actual, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

#[test]
fn test_generate_secure_code_format() {
    for _ in 0..200 {
        let code = VerificationService::<InMemoryCodeStore, RecordingEmailSender>::generate_secure_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[tokio::test]
async fn test_issue_stores_and_sends_code() {
    let f = fixture();
    let code = f.service.issue(&f.user, CodePurpose::EmailVerification).await.unwrap();

    assert_eq!(code.user_id, f.user.id);
    assert_eq!(code.purpose, CodePurpose::EmailVerification);
    let remaining = code.remaining_seconds();
    assert!(remaining > 290 && remaining <= 300);

    assert_eq!(f.store.peek(&f.user.id), Some(code.clone()));

    let message = f.email.last_sent_to("pupil@school.edu").unwrap();
    assert!(message.body.contains(&code.code));
    assert!(message.body.contains("5 minutes"));
    assert_eq!(message.subject, "Verify your email address");
}

#[tokio::test]
async fn test_reset_code_lives_ten_minutes() {
    let f = fixture();
    let code = f.service.issue(&f.user, CodePurpose::ResetPassword).await.unwrap();

    let remaining = code.remaining_seconds();
    assert!(remaining > 590 && remaining <= 600);
    let message = f.email.last_sent_to("pupil@school.edu").unwrap();
    assert_eq!(message.subject, "Reset your password");
}

#[tokio::test]
async fn test_new_code_supersedes_previous_one() {
    let f = fixture();
    let first = f.service.issue(&f.user, CodePurpose::EmailVerification).await.unwrap();
    let second = f.service.issue(&f.user, CodePurpose::ResetPassword).await.unwrap();

    assert_eq!(f.store.peek(&f.user.id), Some(second.clone()));

    // The first code can no longer pass its own flow
    if first.code != second.code {
        assert_code_error(
            f.service.verify(&f.user.id, &first.code, CodePurpose::EmailVerification).await,
            CodeError::CodeInvalid,
        );
    }
}

#[tokio::test]
async fn test_verify_consumes_code() {
    let f = fixture();
    let code = f.service.issue(&f.user, CodePurpose::EmailVerification).await.unwrap();

    let verified = f
        .service
        .verify(&f.user.id, &code.code, CodePurpose::EmailVerification)
        .await
        .unwrap();
    assert_eq!(verified, code);
    assert!(f.store.peek(&f.user.id).is_none());

    assert_code_error(
        f.service.verify(&f.user.id, &code.code, CodePurpose::EmailVerification).await,
        CodeError::CodeNotFound,
    );
}

#[tokio::test]
async fn test_wrong_value_keeps_code() {
    let f = fixture();
    let code = f.service.issue(&f.user, CodePurpose::ResetPassword).await.unwrap();
    let wrong = if code.code == "000000" { "111111" } else { "000000" };

    assert_code_error(
        f.service.verify(&f.user.id, wrong, CodePurpose::ResetPassword).await,
        CodeError::CodeInvalid,
    );
    assert!(f.store.peek(&f.user.id).is_some());
}

#[tokio::test]
async fn test_purpose_isolation() {
    let f = fixture();
    let code = f.service.issue(&f.user, CodePurpose::EmailVerification).await.unwrap();

    assert_code_error(
        f.service.verify(&f.user.id, &code.code, CodePurpose::ResetPassword).await,
        CodeError::InvalidPurpose,
    );
    // Still usable for the flow it was issued for
    assert!(f
        .service
        .verify(&f.user.id, &code.code, CodePurpose::EmailVerification)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_expired_code_is_rejected() {
    let f = fixture();
    let mut code = VerificationCode::new(
        f.user.id.clone(),
        "123456".to_string(),
        CodePurpose::ResetPassword,
        600,
    );
    code.expires_at = Utc::now() - Duration::seconds(1);
    f.store.insert_raw(code, std::time::Duration::from_secs(60));

    assert_code_error(
        f.service.verify(&f.user.id, "123456", CodePurpose::ResetPassword).await,
        CodeError::CodeExpired,
    );
}

#[tokio::test]
async fn test_value_is_checked_before_expiry_and_purpose() {
    let f = fixture();
    let mut code = VerificationCode::new(
        f.user.id.clone(),
        "123456".to_string(),
        CodePurpose::EmailVerification,
        300,
    );
    code.expires_at = Utc::now() - Duration::seconds(1);
    f.store.insert_raw(code, std::time::Duration::from_secs(60));

    assert_code_error(
        f.service.verify(&f.user.id, "654321", CodePurpose::ResetPassword).await,
        CodeError::CodeInvalid,
    );
    assert_code_error(
        f.service.verify(&f.user.id, "123456", CodePurpose::ResetPassword).await,
        CodeError::CodeExpired,
    );
}

#[tokio::test]
async fn test_delivery_failure_drops_code() {
    let f = fixture();
    f.email.set_should_fail(true);

    let result = f.service.issue(&f.user, CodePurpose::EmailVerification).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert!(f.store.peek(&f.user.id).is_none());
}

#[tokio::test]
async fn test_store_failure_is_internal() {
    let f = fixture();
    f.store.set_should_fail(true);

    let result = f.service.issue(&f.user, CodePurpose::EmailVerification).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert!(f.email.sent().is_empty());
}

#[tokio::test]
async fn test_consume_is_idempotent() {
    let f = fixture();
    f.service.issue(&f.user, CodePurpose::ResetPassword).await.unwrap();

    f.service.consume(&f.user.id, CodePurpose::ResetPassword).await.unwrap();
    f.service.consume(&f.user.id, CodePurpose::ResetPassword).await.unwrap();
    assert!(f.store.peek(&f.user.id).is_none());
}

#[tokio::test]
async fn test_check_leaves_code_in_place() {
    let f = fixture();
    let code = f.service.issue(&f.user, CodePurpose::EmailVerification).await.unwrap();

    f.service
        .check(&f.user.id, &code.code, CodePurpose::EmailVerification)
        .await
        .unwrap();
    assert!(f.store.peek(&f.user.id).is_some());

    f.service
        .verify(&f.user.id, &code.code, CodePurpose::EmailVerification)
        .await
        .unwrap();
    assert!(f.store.peek(&f.user.id).is_none());
}
