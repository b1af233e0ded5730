//! Authentication service module
//!
//! Coordinates the token service, one-time codes, password hashing and
//! user storage:
//! - registration and login
//! - token validation
//! - profile and password changes
//! - email verification and password recovery

mod config;
mod fakes;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use fakes::{FakePasswordHasher, LoggingEventPublisher, RecordingEventPublisher};
pub use service::{AuthService, LoginResult};
pub use traits::{PasswordHasher, UserEventPublisher};
