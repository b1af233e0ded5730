//! Token service module for JWT management
//!
//! Stateless HS256 signing and verification of bearer credentials. There is
//! no revocation store: a token stays valid until its embedded expiry.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
