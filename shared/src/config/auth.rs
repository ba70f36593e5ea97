//! Authentication configuration: token signing, cookie delivery and transport policy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DEFAULT_ACCESS_SECRET: &str = "development-access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "development-refresh-secret-change-in-production";

/// Upper bound for configured token lifetimes and the retention window (100 years)
pub const MAX_DURATION_SECONDS: i64 = 100 * 365 * 86_400;

/// Checks a configured number of seconds is positive and at most [`MAX_DURATION_SECONDS`]
pub fn check_duration_seconds(name: &str, seconds: i64) -> Result<i64, String> {
    if seconds <= 0 {
        Err(format!("{} must be a positive number of seconds, got {}", name, seconds))
    } else if seconds > MAX_DURATION_SECONDS {
        Err(format!(
            "{} must not exceed {} seconds, got {}",
            name, MAX_DURATION_SECONDS, seconds
        ))
    } else {
        Ok(seconds)
    }
}

/// JWT signing configuration
///
/// Access and refresh tokens are signed with separate secrets so that a leaked
/// refresh secret cannot be used to forge access tokens and vice versa.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,

    /// Secret used to sign refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Algorithm for JWT signing (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_expiry: 1800,     // 30 minutes
            refresh_token_expiry: 2592000, // 30 days
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with the two signing secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Set the signing algorithm name
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Check if either secret is still a development default
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }
}

/// Cookie attributes used by the cookie transport policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Cookie carrying the access token
    pub access_cookie_name: String,

    /// Cookie carrying the refresh token
    pub refresh_cookie_name: String,

    /// Cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Cookie SameSite attribute
    pub same_site: String,

    /// Cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Cookie path
    #[serde(default = "default_cookie_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: String::from("access_token"),
            refresh_cookie_name: String::from("refresh_token"),
            secure: true,
            same_site: String::from("Lax"),
            http_only: default_http_only(),
            path: default_cookie_path(),
        }
    }
}

/// Where issued tokens live and how revocation is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportPolicy {
    /// Tokens delivered as signed cookies; verification never consults the store
    Cookie,
    /// Tokens delivered in the response body; every verification consults the store
    Body,
}

impl TransportPolicy {
    /// Whether verification must consult the credential store
    pub fn is_stateful(&self) -> bool {
        matches!(self, TransportPolicy::Body)
    }
}

impl Default for TransportPolicy {
    fn default() -> Self {
        TransportPolicy::Body
    }
}

impl fmt::Display for TransportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportPolicy::Cookie => write!(f, "cookie"),
            TransportPolicy::Body => write!(f, "body"),
        }
    }
}

impl FromStr for TransportPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cookie" | "cookies" | "stateless" => Ok(TransportPolicy::Cookie),
            "body" | "store" | "stateful" => Ok(TransportPolicy::Body),
            _ => Err(format!("Invalid transport policy: {}", s)),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Token transport policy
    #[serde(default)]
    pub transport: TransportPolicy,

    /// Raw `AUTH_TRANSPORT` value the policy was parsed from, if set
    #[serde(skip)]
    pub transport_setting: Option<String>,

    /// Age in seconds after which token records are purged
    #[serde(default = "default_retention_seconds")]
    pub retention_seconds: i64,

    /// bcrypt cost factor for password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            session: SessionConfig::default(),
            transport: TransportPolicy::default(),
            transport_setting: None,
            retention_seconds: default_retention_seconds(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let access_secret = std::env::var("JWT_ACCESS_SECRET")
            .unwrap_or(defaults.access_secret);
        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .unwrap_or(defaults.refresh_secret);
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm);
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "1800".to_string())
            .parse()
            .unwrap_or(1800);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "2592000".to_string())
            .parse()
            .unwrap_or(2592000);
        let transport_setting = std::env::var("AUTH_TRANSPORT").ok();
        let transport = transport_setting
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        let retention_seconds = std::env::var("TOKEN_RETENTION_SECONDS")
            .unwrap_or_else(|_| default_retention_seconds().to_string())
            .parse()
            .unwrap_or_else(|_| default_retention_seconds());
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .unwrap_or_else(|_| default_bcrypt_cost().to_string())
            .parse()
            .unwrap_or_else(|_| default_bcrypt_cost());
        let secure = std::env::var("COOKIE_SECURE")
            .map(|value| value != "false" && value != "0")
            .unwrap_or(true);

        Self {
            jwt: JwtConfig {
                access_secret,
                refresh_secret,
                access_token_expiry,
                refresh_token_expiry,
                algorithm,
            },
            session: SessionConfig {
                secure,
                ..Default::default()
            },
            transport,
            transport_setting,
            retention_seconds,
            bcrypt_cost,
        }
    }

    /// Settings that cannot be used as configured
    ///
    /// Token lifetimes and the retention window must be in range, and an
    /// `AUTH_TRANSPORT` value that does not parse is reported instead of
    /// silently falling back to the default policy.
    pub fn problems(&self) -> Vec<String> {
        let durations = [
            ("JWT_ACCESS_TOKEN_EXPIRY", self.jwt.access_token_expiry),
            ("JWT_REFRESH_TOKEN_EXPIRY", self.jwt.refresh_token_expiry),
            ("TOKEN_RETENTION_SECONDS", self.retention_seconds),
        ];

        let mut problems: Vec<String> = durations
            .iter()
            .filter_map(|(name, seconds)| check_duration_seconds(name, *seconds).err())
            .collect();

        if let Some(raw) = &self.transport_setting {
            if raw.parse::<TransportPolicy>().is_err() {
                problems.push(format!(
                    "AUTH_TRANSPORT={} is not a transport policy, using {}",
                    raw, self.transport
                ));
            }
        }

        problems
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_http_only() -> bool {
    true
}

fn default_cookie_path() -> String {
    String::from("/")
}

fn default_retention_seconds() -> i64 {
    86400 // 1 day
}

fn default_bcrypt_cost() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 2592000);
        assert_eq!(config.algorithm, "HS256");
        assert_ne!(config.access_secret, config.refresh_secret);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("access", "refresh")
            .with_access_expiry_minutes(60)
            .with_refresh_expiry_days(14)
            .with_algorithm("HS512");

        assert_eq!(config.access_token_expiry, 3600);
        assert_eq!(config.refresh_token_expiry, 14 * 86400);
        assert_eq!(config.algorithm, "HS512");
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_session_cookie_defaults() {
        let session = SessionConfig::default();
        assert!(session.http_only);
        assert!(session.secure);
        assert_eq!(session.same_site, "Lax");
        assert_eq!(session.access_cookie_name, "access_token");
        assert_eq!(session.refresh_cookie_name, "refresh_token");
    }

    #[test]
    fn test_transport_policy_parsing() {
        assert_eq!("cookie".parse::<TransportPolicy>().unwrap(), TransportPolicy::Cookie);
        assert_eq!("BODY".parse::<TransportPolicy>().unwrap(), TransportPolicy::Body);
        assert_eq!("stateful".parse::<TransportPolicy>().unwrap(), TransportPolicy::Body);
        assert!("header".parse::<TransportPolicy>().is_err());

        assert!(TransportPolicy::Body.is_stateful());
        assert!(!TransportPolicy::Cookie.is_stateful());
        assert_eq!(TransportPolicy::Cookie.to_string(), "cookie");
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.retention_seconds, 86400);
        assert_eq!(config.transport, TransportPolicy::Body);
        assert_eq!(config.bcrypt_cost, 12);
        assert!(config.problems().is_empty());
    }

    #[test]
    fn test_duration_bounds() {
        assert_eq!(check_duration_seconds("X", 60), Ok(60));
        assert!(check_duration_seconds("X", 0).is_err());
        assert!(check_duration_seconds("X", -5).is_err());
        assert!(check_duration_seconds("X", i64::MAX).is_err());
        assert!(check_duration_seconds("X", MAX_DURATION_SECONDS).is_ok());
    }

    #[test]
    fn test_out_of_range_durations_are_reported() {
        let mut config = AuthConfig::default();
        config.retention_seconds = 0;
        config.jwt.access_token_expiry = -1;
        config.jwt.refresh_token_expiry = i64::MAX;

        let problems = config.problems();
        assert_eq!(problems.len(), 3);
        assert!(problems[0].starts_with("JWT_ACCESS_TOKEN_EXPIRY"));
        assert!(problems[1].starts_with("JWT_REFRESH_TOKEN_EXPIRY"));
        assert!(problems[2].starts_with("TOKEN_RETENTION_SECONDS"));
    }

    #[test]
    fn test_misspelled_transport_is_reported() {
        let mut config = AuthConfig::default();
        config.transport_setting = Some("cookeis".to_string());

        let problems = config.problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("cookeis"));
        assert!(problems[0].contains("body"));

        config.transport_setting = Some("Cookie".to_string());
        assert!(config.problems().is_empty());
    }
}
