//! Signing and verification of access and refresh credentials

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Mints and verifies signed credentials
///
/// Access and refresh tokens are signed with separate secrets, so a token of
/// one kind never verifies as the other.
#[derive(Clone)]
pub struct CredentialCodec {
    config: TokenServiceConfig,
    access_keys: SigningKeys,
    refresh_keys: SigningKeys,
    validation: Validation,
}

impl CredentialCodec {
    /// Creates a codec from the token configuration
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Validation)` - A secret is empty or both secrets are equal
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        if config.access_secret.is_empty() || config.refresh_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "Token secrets must not be empty".to_string(),
            });
        }
        if config.access_secret == config.refresh_secret {
            return Err(DomainError::Validation {
                message: "Access and refresh secrets must differ".to_string(),
            });
        }

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            access_keys: SigningKeys::from_secret(&config.access_secret),
            refresh_keys: SigningKeys::from_secret(&config.refresh_secret),
            config,
            validation,
        })
    }

    /// Configured lifetime for a token kind
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.config.access_ttl,
            TokenKind::Refresh => self.config.refresh_ttl,
        }
    }

    /// Signs a token for `subject_id` expiring `ttl` from now
    pub fn mint(&self, subject_id: i64, kind: TokenKind, ttl: Duration) -> DomainResult<String> {
        let claims = Claims::new(subject_id, kind, ttl);
        self.encode_claims(&claims)
    }

    /// Signs a token with the configured lifetime for its kind
    pub fn mint_default(&self, subject_id: i64, kind: TokenKind) -> DomainResult<String> {
        self.mint(subject_id, kind, self.ttl(kind))
    }

    /// Verifies a token of the given kind and returns its subject id
    ///
    /// The signature is checked before the expiry, so an expired token signed
    /// with a foreign secret reports `InvalidSignature`.
    ///
    /// # Returns
    ///
    /// * `Ok(i64)` - Subject id from the signed payload
    /// * `Err(TokenError::InvalidSignature)` - Signed with another secret
    /// * `Err(TokenError::Expired)` - Signature valid, expiry passed
    /// * `Err(TokenError::Malformed)` - Unparseable, non-integer subject or wrong kind
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<i64, TokenError> {
        let claims = self.decode_claims(token, kind)?;

        if claims.kind != kind {
            debug!("Rejected {} token presented as {}", claims.kind, kind);
            return Err(TokenError::Malformed);
        }

        claims.subject_id().map_err(|_| TokenError::Malformed)
    }

    /// Decodes and validates the claims without checking the kind
    pub fn decode_claims(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }

    fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.keys(claims.kind).encoding).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to sign token: {}", e),
            }
        })
    }
}
