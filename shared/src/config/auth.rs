//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use super::{bool_or, parse_or, string_or, Lookup};
use crate::errors::ConfigResult;

const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// JWT issuer claim
    #[serde(default)]
    pub issuer: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_expiry: 86400, // 24 hours
            issuer: None,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        Ok(Self {
            secret: string_or(lookup, "JWT_SECRET", DEFAULT_JWT_SECRET),
            access_token_expiry: parse_or(lookup, "JWT_ACCESS_TOKEN_EXPIRY", 86400)?,
            issuer: lookup("JWT_ISSUER").filter(|v| !v.trim().is_empty()),
        })
    }
}

/// Lifetimes of one-time codes, in seconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationCodeConfig {
    /// Email verification code lifetime
    pub email_verification_ttl: i64,

    /// Password reset code lifetime
    pub reset_password_ttl: i64,
}

impl Default for VerificationCodeConfig {
    fn default() -> Self {
        Self {
            email_verification_ttl: 300, // 5 minutes
            reset_password_ttl: 600,     // 10 minutes
        }
    }
}

/// Status reported to clients when registration hits an existing email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEmailStatus {
    /// Report `AlreadyExists`
    #[default]
    AlreadyExists,
    /// Report `Internal`, hiding whether the address is taken
    Internal,
}

impl std::str::FromStr for DuplicateEmailStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "already_exists" | "already-exists" => Ok(Self::AlreadyExists),
            "internal" => Ok(Self::Internal),
            _ => Err(format!("Invalid duplicate email status: {}", s)),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// One-time code lifetimes
    #[serde(default)]
    pub codes: VerificationCodeConfig,

    /// Verify the current password against the stored hash on password change
    pub require_current_password: bool,

    /// Boundary status for duplicate registrations
    #[serde(default)]
    pub duplicate_email_status: DuplicateEmailStatus,

    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            codes: VerificationCodeConfig::default(),
            require_current_password: true,
            duplicate_email_status: DuplicateEmailStatus::default(),
            min_password_length: 1,
        }
    }
}

impl AuthConfig {
    /// Create from a configuration lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            jwt: JwtConfig::from_lookup(lookup)?,
            codes: VerificationCodeConfig {
                email_verification_ttl: parse_or(
                    lookup,
                    "VERIFICATION_EMAIL_CODE_TTL",
                    defaults.codes.email_verification_ttl,
                )?,
                reset_password_ttl: parse_or(
                    lookup,
                    "VERIFICATION_RESET_CODE_TTL",
                    defaults.codes.reset_password_ttl,
                )?,
            },
            require_current_password: bool_or(
                lookup,
                "AUTH_REQUIRE_CURRENT_PASSWORD",
                defaults.require_current_password,
            )?,
            duplicate_email_status: parse_or(
                lookup,
                "AUTH_DUPLICATE_EMAIL_STATUS",
                defaults.duplicate_email_status,
            )?,
            min_password_length: parse_or(
                lookup,
                "AUTH_MIN_PASSWORD_LENGTH",
                defaults.min_password_length,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 86400);
        assert!(config.issuer.is_none());
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_access_expiry_minutes(30);

        assert_eq!(config.access_token_expiry, 1800);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_duplicate_email_status_from_str() {
        assert_eq!(
            "already_exists".parse::<DuplicateEmailStatus>().unwrap(),
            DuplicateEmailStatus::AlreadyExists
        );
        assert_eq!(
            "INTERNAL".parse::<DuplicateEmailStatus>().unwrap(),
            DuplicateEmailStatus::Internal
        );
        assert!("conflict".parse::<DuplicateEmailStatus>().is_err());
    }

    #[test]
    fn test_auth_config_from_lookup() {
        let lookup = |key: &str| match key {
            "AUTH_REQUIRE_CURRENT_PASSWORD" => Some("false".to_string()),
            "AUTH_DUPLICATE_EMAIL_STATUS" => Some("internal".to_string()),
            "VERIFICATION_RESET_CODE_TTL" => Some("900".to_string()),
            "JWT_ISSUER" => Some("eduauth".to_string()),
            _ => None,
        };
        let config = AuthConfig::from_lookup(&lookup).unwrap();

        assert!(!config.require_current_password);
        assert_eq!(config.duplicate_email_status, DuplicateEmailStatus::Internal);
        assert_eq!(config.codes.reset_password_ttl, 900);
        assert_eq!(config.codes.email_verification_ttl, 300);
        assert_eq!(config.jwt.issuer.as_deref(), Some("eduauth"));
    }
}
