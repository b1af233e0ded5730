//! Token claims and the verified identity they carry.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::user::Role;

/// Token type reported to clients
pub const TOKEN_TYPE: &str = "Bearer";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Role of the subject
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Creates claims valid for `ttl_seconds` starting at `issued_at`
    pub fn new(user_id: &str, role: Role, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: user_id.to_string(),
            role,
            iat: issued_at,
            exp: issued_at + ttl_seconds,
            iss: None,
        }
    }

    /// A token whose expiry is not strictly in the future is expired
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Verified identity extracted from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub user_id: String,
    /// Not carried in the token; empty unless the caller fills it in
    pub email: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    /// Unix seconds
    pub expires_at: i64,
}

impl TokenPayload {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            email: String::new(),
            role: claims.role,
            issued_at: Utc
                .timestamp_opt(claims.iat, 0)
                .single()
                .unwrap_or_else(Utc::now),
            expires_at: claims.exp,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Result of signing a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    /// Unix seconds
    pub expires_at: i64,
}
