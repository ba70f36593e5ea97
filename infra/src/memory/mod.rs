//! In-memory implementations for tests and local development
//!
//! Nothing here survives a restart.

mod credential_store;
mod user_repository;

#[cfg(test)]
mod tests;

pub use credential_store::{InMemoryCredentialStore, InMemoryTransaction};
pub use user_repository::InMemoryUserRepository;
