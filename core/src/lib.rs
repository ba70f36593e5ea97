//! # Authkeeper Core
//!
//! Token lifecycle logic and domain layer for the Authkeeper backend.
//! This crate contains the domain entities, the credential codec, the token
//! lifecycle manager, repository interfaces and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
