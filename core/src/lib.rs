//! # EduAuth Core
//!
//! Core business logic and domain layer for the EduAuth backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types. Every collaborator interface ships with an in-memory
//! implementation usable in tests and local runs.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
