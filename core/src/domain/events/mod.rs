//! Domain events emitted after state changes.

pub mod user_registered;

pub use user_registered::{UserRegisteredEvent, USER_REGISTERED_TOPIC};
