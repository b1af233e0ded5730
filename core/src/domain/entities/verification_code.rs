//! One-time code entity used for email verification and password recovery.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// What a one-time code authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    EmailVerification,
    ResetPassword,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::EmailVerification => "email_verification",
            CodePurpose::ResetPassword => "reset_password",
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_verification" => Ok(CodePurpose::EmailVerification),
            "reset_password" => Ok(CodePurpose::ResetPassword),
            _ => Err(format!("Invalid code purpose: {}", s)),
        }
    }
}

/// An outstanding one-time code. At most one exists per user, whatever
/// its purpose: issuing a new code replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Owner of the code
    pub user_id: String,

    /// The 6-digit numeric code
    pub code: String,

    /// What the code authorizes
    pub purpose: CodePurpose,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a code that expires `ttl_seconds` from now
    pub fn new(user_id: String, code: String, purpose: CodePurpose, ttl_seconds: i64) -> Self {
        Self {
            user_id,
            code,
            purpose,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds),
        }
    }

    /// Expired once `now` reaches `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whole seconds left before expiry, zero when already expired
    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}
