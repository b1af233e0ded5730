//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{parse_or, string_or, Lookup};
use crate::errors::ConfigResult;

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds, applied to every command
    pub response_timeout: u64,

    /// Enable cache key prefix
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout: 5,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from a configuration lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            url: string_or(lookup, "REDIS_URL", &defaults.url),
            connection_timeout: parse_or(
                lookup,
                "REDIS_CONNECTION_TIMEOUT",
                defaults.connection_timeout,
            )?,
            response_timeout: parse_or(lookup, "REDIS_RESPONSE_TIMEOUT", defaults.response_timeout)?,
            key_prefix: lookup("REDIS_KEY_PREFIX").filter(|v| !v.trim().is_empty()),
        })
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}
