//! Business services containing domain logic and use cases.

pub mod account;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, BcryptHasher, PasswordHasher};
pub use token::{CredentialCodec, LogoutOutcome, TokenLifecycle, TokenServiceConfig};
