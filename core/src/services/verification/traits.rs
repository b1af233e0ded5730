//! Traits for code storage and email delivery

use async_trait::async_trait;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::templates::EmailMessage;

/// Short-lived keyed storage for one-time codes
///
/// Codes are keyed by user id only. Storing a code replaces whatever the
/// user had outstanding, regardless of purpose.
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// Upsert the code with a TTL equal to its remaining lifetime
    async fn set(&self, code: &VerificationCode) -> Result<(), DomainError>;

    /// Fetch the outstanding code; `Ok(None)` when absent or evicted
    async fn get(&self, user_id: &str) -> Result<Option<VerificationCode>, DomainError>;

    /// Remove the code; deleting an absent code is not an error
    async fn delete(&self, user_id: &str) -> Result<(), DomainError>;
}

/// Outbound email delivery
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), DomainError>;
}
