//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing, cookie delivery and transport policy
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, SessionConfig, TransportPolicy};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Check the configuration for unusable settings and for settings that
    /// must not reach production
    ///
    /// Returns one message per problem; an empty list means the configuration
    /// is acceptable for the current environment.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = self.auth.problems();
        problems.extend(self.database.problems());

        if self.auth.jwt.access_secret == self.auth.jwt.refresh_secret {
            problems.push("access and refresh tokens must use different secrets".to_string());
        }

        if self.environment.is_production() {
            if self.auth.jwt.is_using_default_secret() {
                problems.push("JWT secrets are still the development defaults".to_string());
            }
            if !self.auth.session.secure {
                problems.push("cookies must carry the Secure flag in production".to_string());
            }
        }

        problems
    }
}
