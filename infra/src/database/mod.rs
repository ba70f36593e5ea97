//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and schema bootstrap
//! - The credential store with per-operation transactions
//! - The user directory

pub mod connection;
pub mod credential_store;
pub mod user_repository;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use credential_store::{PgCredentialStore, PgCredentialTransaction};
pub use user_repository::PgUserRepository;
