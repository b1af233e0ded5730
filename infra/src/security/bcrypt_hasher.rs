//! bcrypt implementation of the PasswordHasher trait.
//!
//! Hashing is CPU bound, so both operations run on the blocking pool.

use async_trait::async_trait;

use ea_core::errors::DomainError;
use ea_core::services::PasswordHasher;

use crate::InfrastructureError;

#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Lower costs are only meant for tests
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn join_failed(e: tokio::task::JoinError) -> DomainError {
    DomainError::internal(format!("Hashing task failed: {}", e))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;

        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(join_failed)?
            .map_err(InfrastructureError::from)?;

        Ok(hashed)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();

        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(join_failed)?;

        match matches {
            Ok(matches) => Ok(matches),
            // A malformed stored hash can never match
            Err(bcrypt::BcryptError::InvalidHash(_)) => Ok(false),
            Err(e) => Err(InfrastructureError::from(e).into()),
        }
    }
}
