//! In-memory implementation of UserRepository for tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Process-local user store keyed by id
#[derive(Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    should_fail: Arc<AtomicBool>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail with a storage error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("user storage unavailable"));
        }
        Ok(())
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(AuthError::UserNotFound.into());
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;
        Ok(users.remove(id).is_some())
    }
}
