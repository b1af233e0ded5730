//! Configuration for the authentication service

use ea_shared::config::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Check the current password against the stored hash before a change
    pub require_current_password: bool,
    /// Minimum accepted password length, in characters
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            require_current_password: true,
            min_password_length: 1,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            require_current_password: config.require_current_password,
            min_password_length: config.min_password_length,
        }
    }
}
