//! Main verification service implementation

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::sync::Arc;

use ea_shared::utils::mask_email;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::{CodePurpose, VerificationCode, CODE_LENGTH};
use crate::errors::{CodeError, DomainResult};

use super::config::VerificationServiceConfig;
use super::templates::EmailMessage;
use super::traits::{EmailSender, VerificationCodeStore};

/// Verification service issuing and consuming one-time codes
pub struct VerificationService<C: VerificationCodeStore, E: EmailSender> {
    /// Keyed store holding at most one code per user
    code_store: Arc<C>,
    /// Delivery channel for codes
    email_sender: Arc<E>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<C: VerificationCodeStore, E: EmailSender> VerificationService<C, E> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `code_store` - Code storage implementation
    /// * `email_sender` - Email delivery implementation
    /// * `config` - Service configuration
    pub fn new(code_store: Arc<C>, email_sender: Arc<E>, config: VerificationServiceConfig) -> Self {
        Self {
            code_store,
            email_sender,
            config,
        }
    }

    /// Issue a fresh code to `user` and email it
    ///
    /// The new code replaces any outstanding code of the user, whatever its
    /// purpose. When delivery fails the stored code is dropped again.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationCode)` - The stored code
    /// * `Err(DomainError)` - Storage or delivery failed
    pub async fn issue(&self, user: &User, purpose: CodePurpose) -> DomainResult<VerificationCode> {
        let ttl = self.config.ttl_for(purpose);
        let code = VerificationCode::new(user.id.clone(), Self::generate_secure_code(), purpose, ttl);

        self.code_store.set(&code).await?;

        let message = EmailMessage::for_code(&user.email, &code.code, purpose, ttl);
        if let Err(e) = self.email_sender.send(message).await {
            tracing::error!(
                user_id = %user.id,
                email = %mask_email(&user.email),
                purpose = %purpose,
                error = %e,
                event = "verification_code_delivery_failed",
                "Failed to deliver verification code"
            );
            if let Err(cleanup) = self.code_store.delete(&user.id).await {
                tracing::warn!(user_id = %user.id, error = %cleanup, "Failed to drop undelivered code");
            }
            return Err(e);
        }

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            purpose = %purpose,
            expires_at = %code.expires_at,
            event = "verification_code_issued",
            "Verification code issued"
        );

        Ok(code)
    }

    /// Check `code` for `purpose` and consume it
    ///
    /// The code is deleted only on success.
    pub async fn verify(
        &self,
        user_id: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> DomainResult<VerificationCode> {
        let stored = self.check(user_id, code, purpose).await?;
        self.consume(user_id, purpose).await?;
        Ok(stored)
    }

    /// Check `code` for `purpose` without consuming it
    ///
    /// Checks run in order: presence, value, expiry, purpose. Each failure
    /// has its own error so a code issued for one flow can never pass
    /// another.
    pub async fn check(
        &self,
        user_id: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> DomainResult<VerificationCode> {
        let stored = self
            .code_store
            .get(user_id)
            .await?
            .ok_or(CodeError::CodeNotFound)?;

        if !Self::secure_compare(&stored.code, code) {
            tracing::warn!(user_id = %user_id, event = "verification_code_mismatch", "Code mismatch");
            return Err(CodeError::CodeInvalid.into());
        }

        // Fails closed: a code is already expired at its expiry instant
        if stored.is_expired_at(Utc::now()) {
            return Err(CodeError::CodeExpired.into());
        }

        if stored.purpose != purpose {
            tracing::warn!(
                user_id = %user_id,
                expected = %purpose,
                actual = %stored.purpose,
                event = "verification_code_wrong_purpose",
                "Code presented for another purpose"
            );
            return Err(CodeError::InvalidPurpose.into());
        }

        Ok(stored)
    }

    /// Delete a checked code once the flow it gates has been applied
    pub async fn consume(&self, user_id: &str, purpose: CodePurpose) -> DomainResult<()> {
        self.code_store.delete(user_id).await?;

        tracing::info!(
            user_id = %user_id,
            purpose = %purpose,
            event = "verification_code_consumed",
            "Verification code consumed"
        );
        Ok(())
    }

    /// Generate a uniformly random 6-digit numeric code
    pub fn generate_secure_code() -> String {
        let value: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", value, width = CODE_LENGTH)
    }

    /// Constant-time comparison of two codes
    fn secure_compare(expected: &str, provided: &str) -> bool {
        constant_time_eq(expected.as_bytes(), provided.as_bytes())
    }
}
