//! Token lifecycle: issuance, authentication and revocation

use std::sync::Arc;

use ak_shared::{AuthConfig, TransportPolicy};
use chrono::Duration;
use tracing::{debug, error, info, warn};

use crate::domain::entities::token::{TokenKind, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{CredentialStore, CredentialTransaction};

use super::codec::CredentialCodec;
use super::config::{configured_duration, TokenServiceConfig};

/// Summary of one logout, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Subject the token belonged to
    pub subject_id: i64,
    /// Stale records removed by the retention sweep
    pub swept: u64,
    /// Whether an active record was flagged inactive
    pub revoked: bool,
}

/// Issues, authenticates and revokes credential pairs
///
/// One lifecycle serves both transport policies. Records are written at login
/// and flagged at logout regardless of the policy; only `authenticate`
/// differs. Under [`TransportPolicy::Cookie`] the store is never consulted,
/// so a token copied before logout stays valid until it expires.
pub struct TokenLifecycle<S: CredentialStore> {
    store: Arc<S>,
    codec: CredentialCodec,
    policy: TransportPolicy,
    retention: Duration,
}

impl<S: CredentialStore> TokenLifecycle<S> {
    /// Creates a lifecycle with the default one-day retention window
    pub fn new(store: Arc<S>, codec: CredentialCodec, policy: TransportPolicy) -> Self {
        Self {
            store,
            codec,
            policy,
            retention: Duration::days(1),
        }
    }

    /// Builds the codec and lifecycle from the shared auth settings
    ///
    /// Token lifetimes and the retention window must be positive and in
    /// range; a zero window would let any logout sweep every live record.
    pub fn from_config(store: Arc<S>, config: &AuthConfig) -> DomainResult<Self> {
        let codec = CredentialCodec::new(TokenServiceConfig::from_jwt_config(&config.jwt)?)?;
        let retention = configured_duration("TOKEN_RETENTION_SECONDS", config.retention_seconds)?;

        Ok(Self::new(store, codec, config.transport).with_retention(retention))
    }

    /// Overrides the retention window used by the logout sweep
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn policy(&self) -> TransportPolicy {
        self.policy
    }

    pub fn codec(&self) -> &CredentialCodec {
        &self.codec
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Issues a token pair for `subject_id` and records it
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both tokens plus the id of the backing record
    /// * `Err(DomainError::Credential)` - The record could not be persisted
    pub async fn login(&self, subject_id: i64) -> DomainResult<TokenPair> {
        let access_token = self.codec.mint_default(subject_id, TokenKind::Access)?;
        let refresh_token = self.codec.mint_default(subject_id, TokenKind::Refresh)?;

        let record_id = self
            .persist(subject_id, &access_token, &refresh_token)
            .await
            .map_err(|e| {
                error!("Failed to record token pair for subject {}: {}", subject_id, e);
                e
            })?;

        info!(
            "Issued token pair for subject {} (record {}, policy {})",
            subject_id, record_id, self.policy
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.codec.ttl(TokenKind::Access).num_seconds(),
            refresh_expires_in: self.codec.ttl(TokenKind::Refresh).num_seconds(),
            record_id,
        })
    }

    async fn persist(
        &self,
        subject_id: i64,
        access_token: &str,
        refresh_token: &str,
    ) -> DomainResult<i64> {
        let mut tx = self.store.begin().await?;
        let record_id = tx.insert(subject_id, access_token, refresh_token).await?;
        tx.commit().await?;
        Ok(record_id)
    }

    /// Resolves an access token to its subject id
    ///
    /// The subject id always comes from the signed payload. Under the body
    /// policy an active record for exactly this token must also exist.
    pub async fn authenticate(&self, token: &str) -> DomainResult<i64> {
        if token.is_empty() {
            return Err(TokenError::Unauthenticated.into());
        }

        let subject_id = self.codec.verify(token, TokenKind::Access).map_err(|e| {
            debug!("Access token rejected: {}", e);
            e
        })?;

        if self.policy.is_stateful() && self.store.find_active(subject_id, token).await?.is_none()
        {
            warn!("No active record for subject {}, token revoked", subject_id);
            return Err(TokenError::Revoked.into());
        }

        debug!("Authenticated subject {}", subject_id);
        Ok(subject_id)
    }

    /// Revokes the pair an access token belongs to
    ///
    /// Any decode failure is reported as `Unauthenticated`. The retention
    /// sweep and the deactivation share one transaction. Logging out an
    /// already revoked token succeeds with `revoked == false`.
    pub async fn logout(&self, token: &str) -> DomainResult<LogoutOutcome> {
        let subject_id = self
            .codec
            .verify(token, TokenKind::Access)
            .map_err(|e| {
                debug!("Logout with unusable token: {}", e);
                DomainError::from(TokenError::Unauthenticated)
            })?;

        let outcome = self.revoke(subject_id, token).await.map_err(|e| {
            error!("Failed to revoke token for subject {}: {}", subject_id, e);
            e
        })?;

        info!(
            "Logout for subject {}: revoked={}, swept {} stale records",
            outcome.subject_id, outcome.revoked, outcome.swept
        );

        Ok(outcome)
    }

    async fn revoke(&self, subject_id: i64, token: &str) -> DomainResult<LogoutOutcome> {
        let mut tx = self.store.begin().await?;

        let swept = tx.sweep_expired(self.retention).await?;
        let revoked = match tx.find_active(subject_id, token).await? {
            Some(record) => tx.deactivate(record.id).await?,
            None => false,
        };

        tx.commit().await?;

        Ok(LogoutOutcome {
            subject_id,
            swept,
            revoked,
        })
    }
}
