//! Shared configuration and common types for the Authkeeper server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    ServerConfig, SessionConfig, TransportPolicy,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
