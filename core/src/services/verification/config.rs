//! Configuration for the verification service

use ea_shared::config::VerificationCodeConfig;

use crate::domain::entities::verification_code::CodePurpose;

/// Code lifetimes per purpose, in seconds
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    pub email_verification_ttl_seconds: i64,
    pub reset_password_ttl_seconds: i64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            email_verification_ttl_seconds: 5 * 60,
            reset_password_ttl_seconds: 10 * 60,
        }
    }
}

impl VerificationServiceConfig {
    pub fn ttl_for(&self, purpose: CodePurpose) -> i64 {
        match purpose {
            CodePurpose::EmailVerification => self.email_verification_ttl_seconds,
            CodePurpose::ResetPassword => self.reset_password_ttl_seconds,
        }
    }
}

impl From<&VerificationCodeConfig> for VerificationServiceConfig {
    fn from(config: &VerificationCodeConfig) -> Self {
        Self {
            email_verification_ttl_seconds: config.email_verification_ttl,
            reset_password_ttl_seconds: config.reset_password_ttl,
        }
    }
}
