//! Plain-text bodies for code emails

use crate::domain::entities::verification_code::CodePurpose;

/// A rendered email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// Renders the message carrying `code` for `purpose`
    pub fn for_code(to: &str, code: &str, purpose: CodePurpose, ttl_seconds: i64) -> Self {
        let minutes = (ttl_seconds / 60).max(1);
        let (subject, action) = match purpose {
            CodePurpose::EmailVerification => (
                "Verify your email address",
                "verify your email address",
            ),
            CodePurpose::ResetPassword => ("Reset your password", "reset your password"),
        };

        let body = format!(
            "Your code to {} is: {}\n\n\
             The code expires in {} minutes and can be used once.\n\
             If you did not request it, you can ignore this email.\n",
            action, code, minutes
        );

        Self {
            to: to.to_string(),
            subject: subject.to_string(),
            body,
        }
    }
}
