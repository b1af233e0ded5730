//! Redis cache client implementation
//!
//! A Redis client with connection retry and bounded command time. Every
//! command runs under the configured response timeout, and dropping the
//! returned future cancels the command.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use ea_shared::config::CacheConfig;

use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with retry logic and per-command deadlines
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum number of attempts for idempotent operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of attempts
    /// * `retry_delay_ms` - Base delay between retries in milliseconds
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            Duration::from_secs(config.connection_timeout),
            max_retries.max(1),
            retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries: max_retries.max(1),
            retry_delay_ms,
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        connect_timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result.map_err(InfrastructureError::Cache),
                Err(_) => Err(InfrastructureError::Timeout("redis connect".to_string())),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Set a value with expiration time
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `value` - Value to cache
    /// * `expiry_seconds` - Time to live in seconds
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!(key = key, expiry_seconds, "Setting key");

        let key_owned = key.to_string();
        let value = value.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            let value = value.clone();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!(key = key, error = %e, "Failed to set key");
            e
        })
    }

    /// Get a value from cache
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key present
    /// * `Ok(None)` - Key absent or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!(key = key, "Getting key");

        let key_owned = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!(key = key, error = %e, "Failed to get key");
            e
        })
    }

    /// Delete a key from cache
    ///
    /// # Returns
    /// * `Ok(true)` - Key was deleted
    /// * `Ok(false)` - Key did not exist
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!(key = key, "Deleting key");

        let key_owned = key.to_string();
        let deleted = self
            .execute_with_retry(move |mut conn| {
                let key = key_owned.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!(key = key, error = %e, "Failed to delete key");
                e
            })?;

        Ok(deleted > 0)
    }

    /// Publish a message on a pub/sub channel
    ///
    /// Not retried: a retry after a lost reply could deliver twice.
    ///
    /// # Returns
    /// * `Ok(n)` - Number of subscribers that received the message
    pub async fn publish(&self, channel: &str, message: &str) -> Result<i64, InfrastructureError> {
        let mut conn = self.connection.clone();
        let channel_owned = channel.to_string();
        let message = message.to_string();
        self.with_deadline(async move { conn.publish::<_, _, i64>(channel_owned, message).await })
            .await
            .map_err(|e| {
                error!(channel = channel, error = %e, "Failed to publish message");
                e
            })
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Run one command under the response timeout
    async fn with_deadline<T, F>(&self, fut: F) -> Result<T, InfrastructureError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match timeout(Duration::from_secs(self.config.response_timeout), fut).await {
            Ok(result) => result.map_err(InfrastructureError::Cache),
            Err(_) => Err(InfrastructureError::Timeout(format!(
                "redis command exceeded {}s",
                self.config.response_timeout
            ))),
        }
    }

    /// Execute an idempotent Redis operation with retry and deadline
    async fn execute_with_retry<F, T>(&self, operation: F) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match self.with_deadline(operation(conn)).await {
                Ok(result) => return Ok(result),
                Err(InfrastructureError::Cache(e))
                    if attempts < self.max_retries && is_retriable_error(&e) =>
                {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Connection-level failures are worth retrying; command errors are not
fn is_retriable_error(error: &redis::RedisError) -> bool {
    error.is_io_error() || error.is_connection_dropped() || error.is_timeout()
}

/// Hide credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
