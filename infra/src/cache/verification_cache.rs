//! Redis-backed verification code store
//!
//! Codes are stored as JSON under `verification:code:{user_id}` (plus the
//! optional configured prefix) with a TTL equal to the code's remaining
//! lifetime. One key per user: a new code overwrites the previous one.

use async_trait::async_trait;
use tracing::{debug, warn};

use ea_core::domain::entities::verification_code::VerificationCode;
use ea_core::errors::DomainError;
use ea_core::services::verification::VerificationCodeStore;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Verification code store backed by Redis `SETEX`/`GET`/`DEL`
#[derive(Clone)]
pub struct RedisVerificationCodeStore {
    /// Redis client for cache operations
    redis_client: RedisClient,
}

impl RedisVerificationCodeStore {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Full Redis key for a user's code
    pub(crate) fn format_code_key(&self, user_id: &str) -> String {
        self.redis_client
            .config()
            .make_key(&code_key(user_id))
    }
}

/// Unprefixed key for a user's code
pub(crate) fn code_key(user_id: &str) -> String {
    format!("verification:code:{}", user_id)
}

/// TTL handed to Redis; never zero so `SETEX` accepts it
pub(crate) fn ttl_for(code: &VerificationCode) -> u64 {
    code.remaining_seconds().max(1) as u64
}

pub(crate) fn encode(code: &VerificationCode) -> Result<String, InfrastructureError> {
    Ok(serde_json::to_string(code)?)
}

pub(crate) fn decode(raw: &str) -> Result<VerificationCode, InfrastructureError> {
    Ok(serde_json::from_str(raw)?)
}

#[async_trait]
impl VerificationCodeStore for RedisVerificationCodeStore {
    async fn set(&self, code: &VerificationCode) -> Result<(), DomainError> {
        let key = self.format_code_key(&code.user_id);
        let ttl = ttl_for(code);
        self.redis_client
            .set_with_expiry(&key, &encode(code)?, ttl)
            .await?;
        debug!(user_id = %code.user_id, ttl, "Verification code stored");
        Ok(())
    }

    async fn get(&self, user_id: &str) -> Result<Option<VerificationCode>, DomainError> {
        let key = self.format_code_key(user_id);
        match self.redis_client.get(&key).await? {
            Some(raw) => match decode(&raw) {
                Ok(code) => Ok(Some(code)),
                Err(e) => {
                    // An unreadable entry can never verify; drop it
                    warn!(user_id = %user_id, error = %e, "Discarding malformed verification code");
                    self.redis_client.delete(&key).await?;
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn delete(&self, user_id: &str) -> Result<(), DomainError> {
        let key = self.format_code_key(user_id);
        self.redis_client.delete(&key).await?;
        Ok(())
    }
}
