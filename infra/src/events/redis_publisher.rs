//! Redis pub/sub implementation of the UserEventPublisher trait.

use async_trait::async_trait;

use ea_core::domain::events::{UserRegisteredEvent, USER_REGISTERED_TOPIC};
use ea_core::errors::DomainError;
use ea_core::services::UserEventPublisher;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Publishes account events as JSON on Redis channels
pub struct RedisUserEventPublisher {
    redis_client: RedisClient,
}

impl RedisUserEventPublisher {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }
}

pub(crate) fn encode_event(event: &UserRegisteredEvent) -> Result<String, InfrastructureError> {
    Ok(serde_json::to_string(event)?)
}

#[async_trait]
impl UserEventPublisher for RedisUserEventPublisher {
    async fn publish_user_registered(&self, event: &UserRegisteredEvent) -> Result<(), DomainError> {
        let payload = encode_event(event)?;
        let receivers = self
            .redis_client
            .publish(USER_REGISTERED_TOPIC, &payload)
            .await?;

        tracing::debug!(
            user_id = %event.user_id,
            topic = USER_REGISTERED_TOPIC,
            receivers,
            "User registered event published"
        );

        Ok(())
    }
}
