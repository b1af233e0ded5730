//! Cache module for Redis-based storage
//!
//! Provides the Redis client (connection retry, bounded command time) and
//! the Redis implementation of the verification code store.

pub mod redis_client;
pub mod verification_cache;


pub use redis_client::RedisClient;
pub use verification_cache::RedisVerificationCodeStore;

// Re-export commonly used types
pub use ea_shared::config::CacheConfig;
