//! Configuration for the token service

use ea_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_ttl_seconds: i64,
    /// Issuer claim to set and require, if any
    pub issuer: Option<String>,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            access_token_ttl_seconds: 86400,
            issuer: None,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_ttl_seconds: config.access_token_expiry,
            issuer: config.issuer.clone(),
        }
    }
}
