//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use uuid::Uuid;

/// Which of the two credentials of a pair a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing API calls
    Access,
    /// Long-lived credential issued alongside the access token
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID, string-encoded integer)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Token kind
    pub kind: TokenKind,

    /// JWT ID, unique per minted token
    pub jti: String,
}

impl Claims {
    /// Creates claims for `subject_id` expiring `ttl` from now
    pub fn new(subject_id: i64, kind: TokenKind, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: subject_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            kind,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Gets the subject ID from the claims
    pub fn subject_id(&self) -> Result<i64, ParseIntError> {
        self.sub.parse()
    }
}

/// Persisted metadata about one issued token pair
///
/// One record is written per login. A record starts active; once deactivated
/// it never becomes active again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Record identifier assigned by the store
    pub id: i64,

    /// Subject (user ID) the pair was issued to
    pub subject_id: i64,

    /// Access token value
    pub access_token: String,

    /// Refresh token value
    pub refresh_token: String,

    /// Whether the pair is still usable
    pub active: bool,

    /// Timestamp when the record was inserted
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Creates a new active record stamped with the current time
    pub fn new(id: i64, subject_id: i64, access_token: String, refresh_token: String) -> Self {
        Self {
            id,
            subject_id,
            access_token,
            refresh_token,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// Flags the record inactive
    ///
    /// Returns `false` if it already was.
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }

    /// Whether the record is older than the retention window at `now`
    pub fn is_stale(&self, retention: Duration, now: DateTime<Utc>) -> bool {
        self.created_at < now - retention
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,

    /// Store record backing this pair
    #[serde(skip)]
    pub record_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(42, TokenKind::Access, Duration::minutes(30));

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.subject_id().unwrap(), 42);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_claims_have_unique_ids() {
        let first = Claims::new(7, TokenKind::Refresh, Duration::days(1));
        let second = Claims::new(7, TokenKind::Refresh, Duration::days(1));

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_claims_non_numeric_subject() {
        let mut claims = Claims::new(1, TokenKind::Access, Duration::minutes(30));
        claims.sub = "not-a-number".to_string();

        assert!(claims.subject_id().is_err());
    }

    #[test]
    fn test_token_kind_serialization() {
        assert_eq!(serde_json::to_string(&TokenKind::Access).unwrap(), "\"access\"");
        assert_eq!(TokenKind::Refresh.to_string(), "refresh");
    }

    #[test]
    fn test_record_deactivation_is_one_way() {
        let mut record = CredentialRecord::new(1, 42, "a".to_string(), "r".to_string());
        assert!(record.active);

        assert!(record.deactivate());
        assert!(!record.active);

        // Second call is a no-op
        assert!(!record.deactivate());
        assert!(!record.active);
    }

    #[test]
    fn test_record_staleness() {
        let now = Utc::now();
        let mut record = CredentialRecord::new(1, 42, "a".to_string(), "r".to_string());

        assert!(!record.is_stale(Duration::days(1), now));

        record.created_at = now - Duration::days(2);
        assert!(record.is_stale(Duration::days(1), now));
    }

    #[test]
    fn test_token_pair_hides_record_id() {
        let pair = TokenPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            access_expires_in: 1800,
            refresh_expires_in: 2592000,
            record_id: 9,
        };

        let json = serde_json::to_value(&pair).unwrap();
        assert!(json.get("record_id").is_none());
        assert_eq!(json["access_expires_in"], 1800);
    }
}
