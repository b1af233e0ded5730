//! Adapter wiring for the configured storage backend

use std::sync::Arc;

use anyhow::Context;

use ea_core::repositories::{InMemoryUserRepository, UserRepository};
use ea_core::services::{
    AuthService, AuthServiceConfig, EmailSender, InMemoryCodeStore, LoggingEventPublisher,
    PasswordHasher, TokenService, TokenServiceConfig, UserEventPublisher, VerificationCodeStore,
    VerificationService, VerificationServiceConfig,
};
use ea_infra::{
    BcryptPasswordHasher, DatabasePool, MySqlUserRepository, RedisClient,
    RedisUserEventPublisher, RedisVerificationCodeStore, SmtpEmailSender,
};
use ea_shared::config::{AppConfig, StorageBackend};

use crate::server;

/// Builds the domain service from already constructed adapters
pub fn build_auth_service<U, H, P, C, E>(
    config: &AppConfig,
    users: U,
    hasher: H,
    publisher: P,
    codes: C,
    email: E,
) -> Arc<AuthService<U, H, P, C, E>>
where
    U: UserRepository,
    H: PasswordHasher,
    P: UserEventPublisher,
    C: VerificationCodeStore,
    E: EmailSender,
{
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let verification = Arc::new(VerificationService::new(
        Arc::new(codes),
        Arc::new(email),
        VerificationServiceConfig::from(&config.auth.codes),
    ));

    Arc::new(AuthService::new(
        Arc::new(users),
        Arc::new(hasher),
        Arc::new(publisher),
        verification,
        token_service,
        AuthServiceConfig::from(&config.auth),
    ))
}

/// Connects the backends selected by `STORAGE_BACKEND` and serves until shutdown
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let email = SmtpEmailSender::new(&config.email).context("failed to configure SMTP")?;

    match config.storage {
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("failed to connect to MySQL")?;
            pool.run_migrations()
                .await
                .context("failed to apply migrations")?;

            let redis = RedisClient::new(config.cache.clone())
                .await
                .context("failed to connect to Redis")?;

            let auth = build_auth_service(
                &config,
                MySqlUserRepository::new(pool.get_pool().clone()),
                BcryptPasswordHasher::new(),
                RedisUserEventPublisher::new(redis.clone()),
                RedisVerificationCodeStore::new(redis),
                email,
            );

            let result = server::serve(&config, auth, server::shutdown_signal()).await;
            pool.close().await;
            result
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; accounts and codes are lost on restart");

            let auth = build_auth_service(
                &config,
                InMemoryUserRepository::new(),
                BcryptPasswordHasher::new(),
                LoggingEventPublisher,
                InMemoryCodeStore::new(),
                email,
            );

            server::serve(&config, auth, server::shutdown_signal()).await
        }
    }
}
