use ea_core::domain::entities::verification_code::CodePurpose;
use ea_core::services::EmailMessage;
use ea_shared::config::EmailConfig;
use lettre::message::Mailbox;

use crate::email::SmtpEmailSender;
use crate::InfrastructureError;

fn sender_mailbox() -> Mailbox {
    "EduAuth <no-reply@eduauth.local>".parse().unwrap()
}

#[test]
fn test_build_message_carries_code_and_headers() {
    let message = EmailMessage::for_code(
        "alice@school.edu",
        "004217",
        CodePurpose::ResetPassword,
        600,
    );

    let email = SmtpEmailSender::build_message(&sender_mailbox(), &message).unwrap();
    let raw = String::from_utf8(email.formatted()).unwrap();

    assert!(raw.contains("To: alice@school.edu"));
    assert!(raw.contains("Subject: Reset your password"));
    assert!(raw.contains("004217"));
}

#[test]
fn test_build_message_rejects_bad_recipient() {
    let message = EmailMessage {
        to: "not an address".to_string(),
        subject: "s".to_string(),
        body: "b".to_string(),
    };

    let err = SmtpEmailSender::build_message(&sender_mailbox(), &message).unwrap_err();
    assert!(matches!(err, InfrastructureError::Email(_)));
}

#[tokio::test]
async fn test_new_rejects_bad_from_address() {
    let config = EmailConfig {
        from_address: "nobody".to_string(),
        ..EmailConfig::default()
    };

    let result = SmtpEmailSender::new(&config);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
async fn test_new_with_default_config() {
    assert!(SmtpEmailSender::new(&EmailConfig::default()).is_ok());
}
