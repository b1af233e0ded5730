//! Outbound email (SMTP) configuration

use serde::{Deserialize, Serialize};

use super::{bool_or, parse_or, string_or, Lookup};
use crate::errors::ConfigResult;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: Option<String>,
    #[serde(default, skip_serializing)]
    pub smtp_password: Option<String>,
    /// Sender mailbox, e.g. `EduAuth <no-reply@eduauth.local>`
    pub from_address: String,
    /// Use STARTTLS/TLS relay; plain connections are only for local relays
    pub use_tls: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("localhost"),
            smtp_port: 1025,
            smtp_username: None,
            smtp_password: None,
            from_address: String::from("EduAuth <no-reply@eduauth.local>"),
            use_tls: false,
        }
    }
}

impl EmailConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            smtp_host: string_or(lookup, "SMTP_HOST", &defaults.smtp_host),
            smtp_port: parse_or(lookup, "SMTP_PORT", defaults.smtp_port)?,
            smtp_username: lookup("SMTP_USERNAME").filter(|v| !v.is_empty()),
            smtp_password: lookup("SMTP_PASSWORD").filter(|v| !v.is_empty()),
            from_address: string_or(lookup, "SMTP_FROM", &defaults.from_address),
            use_tls: bool_or(lookup, "SMTP_TLS", defaults.use_tls)?,
        })
    }

    /// Credentials are only used when both parts are present
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.smtp_username, &self.smtp_password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}
