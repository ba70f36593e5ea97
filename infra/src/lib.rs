//! # Infrastructure Layer
//!
//! Concrete implementations of the credential store and user directory
//! defined in `ak_core`.
//!
//! ## Architecture
//!
//! - **Database**: PostgreSQL implementations using SQLx, plus the pool and
//!   schema bootstrap
//! - **Memory**: in-process implementations for tests and local development

use ak_core::errors::DomainError;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

/// In-memory store and user directory
pub mod memory;

pub use database::{DatabasePool, PgCredentialStore, PgUserRepository};
pub use memory::{InMemoryCredentialStore, InMemoryUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::credential(err.to_string())
    }
}
