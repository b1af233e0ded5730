//! Lightweight collaborator implementations for tests and local runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::events::UserRegisteredEvent;
use crate::errors::DomainError;

use super::traits::{PasswordHasher, UserEventPublisher};

const FAKE_HASH_PREFIX: &str = "fake-hash$";

/// Reversible "hash" for tests. Never use outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakePasswordHasher;

#[async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("{}{}", FAKE_HASH_PREFIX, password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash
            .strip_prefix(FAKE_HASH_PREFIX)
            .map_or(false, |stored| stored == password))
    }
}

/// Publisher that keeps events in memory
#[derive(Clone, Default)]
pub struct RecordingEventPublisher {
    events: Arc<Mutex<Vec<UserRegisteredEvent>>>,
    should_fail: Arc<AtomicBool>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<UserRegisteredEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl UserEventPublisher for RecordingEventPublisher {
    async fn publish_user_registered(&self, event: &UserRegisteredEvent) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("event bus unavailable"));
        }
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
        Ok(())
    }
}

/// Publisher that only writes the event to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventPublisher;

#[async_trait]
impl UserEventPublisher for LoggingEventPublisher {
    async fn publish_user_registered(&self, event: &UserRegisteredEvent) -> Result<(), DomainError> {
        tracing::info!(
            user_id = %event.user_id,
            role = %event.role,
            event = "user_registered_published",
            "User registered event (not forwarded to a message bus)"
        );
        Ok(())
    }
}
