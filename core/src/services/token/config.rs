//! Configuration for the token service

use ak_shared::config::auth::check_duration_seconds;
use ak_shared::JwtConfig;
use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::errors::{DomainError, DomainResult};

/// Configuration for the credential codec
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret signing access tokens
    pub access_secret: String,
    /// Secret signing refresh tokens
    pub refresh_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: "development-access-secret-change-me".to_string(),
            refresh_secret: "development-refresh-secret-change-me".to_string(),
            algorithm: Algorithm::HS256,
            access_ttl: Duration::minutes(30),
            refresh_ttl: Duration::days(30),
        }
    }
}

impl TokenServiceConfig {
    /// Builds the codec configuration from the shared JWT settings
    pub fn from_jwt_config(jwt: &JwtConfig) -> DomainResult<Self> {
        Ok(Self {
            access_secret: jwt.access_secret.clone(),
            refresh_secret: jwt.refresh_secret.clone(),
            algorithm: parse_algorithm(&jwt.algorithm)?,
            access_ttl: configured_duration("JWT_ACCESS_TOKEN_EXPIRY", jwt.access_token_expiry)?,
            refresh_ttl: configured_duration("JWT_REFRESH_TOKEN_EXPIRY", jwt.refresh_token_expiry)?,
        })
    }
}

/// Positive, bounded duration from a configured number of seconds
pub(crate) fn configured_duration(name: &str, seconds: i64) -> DomainResult<Duration> {
    let seconds =
        check_duration_seconds(name, seconds).map_err(|message| DomainError::Validation { message })?;

    Duration::try_seconds(seconds).ok_or_else(|| DomainError::Validation {
        message: format!("{} is out of range", name),
    })
}

/// Only shared-secret algorithms are supported
fn parse_algorithm(name: &str) -> DomainResult<Algorithm> {
    match name.to_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(DomainError::Validation {
            message: format!("Unsupported JWT algorithm: {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_jwt_config() {
        let jwt = JwtConfig::new("a-secret", "r-secret")
            .with_access_expiry_minutes(5)
            .with_refresh_expiry_days(2)
            .with_algorithm("hs512");

        let config = TokenServiceConfig::from_jwt_config(&jwt).unwrap();

        assert_eq!(config.algorithm, Algorithm::HS512);
        assert_eq!(config.access_ttl, Duration::minutes(5));
        assert_eq!(config.refresh_ttl, Duration::days(2));
    }

    #[test]
    fn test_non_positive_ttls_are_rejected() {
        for expiry in [0, -60] {
            let mut jwt = JwtConfig::new("a", "r");
            jwt.access_token_expiry = expiry;

            assert!(matches!(
                TokenServiceConfig::from_jwt_config(&jwt),
                Err(DomainError::Validation { .. })
            ));
        }
    }

    #[test]
    fn test_huge_ttl_is_rejected_without_panicking() {
        let mut jwt = JwtConfig::new("a", "r");
        jwt.refresh_token_expiry = i64::MAX;

        match TokenServiceConfig::from_jwt_config(&jwt) {
            Err(DomainError::Validation { message }) => {
                assert!(message.contains("JWT_REFRESH_TOKEN_EXPIRY"))
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_asymmetric_algorithms_are_rejected() {
        let jwt = JwtConfig::new("a", "r").with_algorithm("RS256");

        assert!(matches!(
            TokenServiceConfig::from_jwt_config(&jwt),
            Err(DomainError::Validation { .. })
        ));
    }
}
