//! Verification service module for one-time codes
//!
//! This module provides the code workflow used by email verification and
//! password recovery:
//! - secure 6-digit code generation
//! - storage behind a TTL-capable keyed store (one code per user)
//! - delivery through an email collaborator
//! - checking value, expiry and purpose, then consuming the code

mod config;
mod memory;
mod service;
mod templates;
mod traits;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use memory::{InMemoryCodeStore, RecordingEmailSender};
pub use service::VerificationService;
pub use templates::EmailMessage;
pub use traits::{EmailSender, VerificationCodeStore};
