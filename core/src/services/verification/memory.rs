//! Process-local adapters for code storage and email delivery

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::templates::EmailMessage;
use super::traits::{EmailSender, VerificationCodeStore};

/// In-memory code store with store-level expiry
///
/// Entries are evicted once their TTL (the code's remaining lifetime at
/// insertion, at least one second) has passed, mirroring a Redis `SETEX`.
#[derive(Clone, Default)]
pub struct InMemoryCodeStore {
    entries: Arc<Mutex<HashMap<String, (VerificationCode, Instant)>>>,
    should_fail: Arc<AtomicBool>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a cache error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Read a code without going through the trait, for assertions
    pub fn peek(&self, user_id: &str) -> Option<VerificationCode> {
        self.lock()
            .get(user_id)
            .filter(|(_, evict_at)| Instant::now() < *evict_at)
            .map(|(code, _)| code.clone())
    }

    /// Store a code as-is, skipping the TTL computation
    pub fn insert_raw(&self, code: VerificationCode, ttl: Duration) {
        self.lock()
            .insert(code.user_id.clone(), (code, Instant::now() + ttl));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, (VerificationCode, Instant)>> {
        // A poisoned map only means a test panicked mid-insert
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("code store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationCodeStore for InMemoryCodeStore {
    async fn set(&self, code: &VerificationCode) -> Result<(), DomainError> {
        self.check_available()?;
        let ttl = Duration::from_secs(code.remaining_seconds().max(1) as u64);
        self.insert_raw(code.clone(), ttl);
        Ok(())
    }

    async fn get(&self, user_id: &str) -> Result<Option<VerificationCode>, DomainError> {
        self.check_available()?;
        let mut entries = self.lock();
        let live = match entries.get(user_id) {
            Some((code, evict_at)) if Instant::now() < *evict_at => Some(code.clone()),
            Some(_) => None,
            None => return Ok(None),
        };
        if live.is_none() {
            entries.remove(user_id);
        }
        Ok(live)
    }

    async fn delete(&self, user_id: &str) -> Result<(), DomainError> {
        self.check_available()?;
        self.lock().remove(user_id);
        Ok(())
    }
}

/// Email sender that keeps messages in memory
#[derive(Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    should_fail: Arc<AtomicBool>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// All messages sent so far, oldest first
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last_sent_to(&self, to: &str) -> Option<EmailMessage> {
        self.sent().into_iter().rev().find(|m| m.to == to)
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("email delivery failed"));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
        Ok(())
    }
}
