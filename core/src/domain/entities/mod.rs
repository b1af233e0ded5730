//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{Claims, IssuedToken, TokenPayload, TOKEN_TYPE};
pub use user::{Role, User, UserProfileUpdate};
pub use verification_code::{CodePurpose, VerificationCode, CODE_LENGTH};
