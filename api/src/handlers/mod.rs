//! gRPC handlers and the domain error to status mapping

pub mod auth;
pub mod error;

#[cfg(test)]
mod tests;

pub use auth::AuthHandler;
pub use error::{domain_status, StatusMapper};
