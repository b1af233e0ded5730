//! User entity representing a registered account in the EduAuth system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user account
///
/// `Unspecified` is the zero value carried by malformed requests and is never
/// accepted by business logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Unspecified,
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Only admin, teacher and student are usable roles
    pub fn is_valid(&self) -> bool {
        !matches!(self, Role::Unspecified)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Unspecified => "unspecified",
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    /// Parses the three valid roles; anything else, including
    /// "unspecified", is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: String,

    /// Login email, globally unique
    pub email: String,

    /// Display name
    pub username: String,

    /// Salted password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account role
    pub role: Role,

    /// Optional contact phone number
    pub phone: Option<String>,

    /// Whether the email address has been verified
    pub verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user with a fresh identifier.
    ///
    /// The username defaults to the local part of the email address.
    pub fn new(email: String, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        let username = email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            username,
            password_hash,
            role,
            phone: None,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the user's email as verified
    pub fn verify(&mut self) {
        self.verified = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Applies a profile update, leaving unset fields untouched
    pub fn apply_profile(&mut self, update: &UserProfileUpdate) {
        if let Some(username) = &update.username {
            self.username = username.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        self.updated_at = Utc::now();
    }
}

/// Partial profile update; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileUpdate {
    pub username: Option<String>,
    pub phone: Option<String>,
}

impl UserProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.phone.is_none()
    }
}
