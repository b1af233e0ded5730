//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{parse_or, string_or, Lookup};
use crate::errors::ConfigResult;

/// RPC methods reachable without a bearer token
pub const DEFAULT_PUBLIC_METHODS: &[&str] = &[
    "/auth.AuthService/Login",
    "/auth.AuthService/Register",
    "/auth.AuthService/ValidateToken",
    "/auth.AuthService/ResetPassword",
    "/auth.AuthService/ConfirmResetPassword",
    "/auth.AuthService/SendVerificationCode",
    "/auth.AuthService/VerifyAccount",
    "/grpc.health.v1.Health/Check",
    "/grpc.health.v1.Health/Watch",
];

/// gRPC server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Upper bound for a single call, in seconds
    pub request_timeout: u64,

    /// Fully-qualified method paths exempt from authentication
    pub public_methods: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 50051,
            request_timeout: 30,
            public_methods: DEFAULT_PUBLIC_METHODS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl ServerConfig {
    /// Create from a configuration lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let defaults = Self::default();
        let public_methods = match lookup("AUTH_PUBLIC_METHODS") {
            Some(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect(),
            _ => defaults.public_methods,
        };

        Ok(Self {
            host: string_or(lookup, "SERVER_HOST", &defaults.host),
            port: parse_or(lookup, "SERVER_PORT", defaults.port)?,
            request_timeout: parse_or(lookup, "SERVER_REQUEST_TIMEOUT", defaults.request_timeout)?,
            public_methods,
        })
    }

    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 50051);
        assert!(config
            .public_methods
            .contains(&"/auth.AuthService/Login".to_string()));
        assert!(!config
            .public_methods
            .contains(&"/auth.AuthService/GetUserByID".to_string()));
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(ServerConfig::new("127.0.0.1", 6000).bind_address(), "127.0.0.1:6000");
    }

    #[test]
    fn test_public_methods_override() {
        let lookup = |key: &str| match key {
            "AUTH_PUBLIC_METHODS" => Some(" /auth.AuthService/Login , ,/auth.AuthService/Register".to_string()),
            _ => None,
        };
        let config = ServerConfig::from_lookup(&lookup).unwrap();
        assert_eq!(
            config.public_methods,
            vec!["/auth.AuthService/Login", "/auth.AuthService/Register"]
        );
    }
}
