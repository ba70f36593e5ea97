//! Credential store traits defining the interface for token record persistence.

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::entities::token::CredentialRecord;
use crate::errors::DomainError;

/// Repository trait for issued token pairs
///
/// Every write happens inside a [`CredentialTransaction`] obtained from
/// [`CredentialStore::begin`]. A transaction is scoped to one logical
/// operation: it is persisted by [`CredentialTransaction::commit`] and rolled
/// back when dropped without committing, so every exit path releases it.
///
/// Implementations map backend failures to [`DomainError::Credential`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Transaction type handed out by [`CredentialStore::begin`]
    type Transaction: CredentialTransaction;

    /// Start a transaction for one logical operation
    ///
    /// # Example
    /// ```no_run
    /// # use ak_core::repositories::{CredentialStore, CredentialTransaction};
    /// # async fn example(store: &impl CredentialStore) -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tx = store.begin().await?;
    /// let record_id = tx.insert(42, "access.jwt", "refresh.jwt").await?;
    /// tx.commit().await?;
    /// println!("stored record {}", record_id);
    /// # Ok(())
    /// # }
    /// ```
    async fn begin(&self) -> Result<Self::Transaction, DomainError>;

    /// Find the active record for `subject_id` holding `access_token`
    ///
    /// Read-only lookup used on the authentication path.
    async fn find_active(
        &self,
        subject_id: i64,
        access_token: &str,
    ) -> Result<Option<CredentialRecord>, DomainError> {
        let mut tx = self.begin().await?;
        tx.find_active(subject_id, access_token).await
    }

    /// Find a record by its identifier regardless of its active flag
    async fn find_by_id(&self, record_id: i64) -> Result<Option<CredentialRecord>, DomainError> {
        let mut tx = self.begin().await?;
        tx.find_by_id(record_id).await
    }
}

/// Operations available inside one store transaction
#[async_trait]
pub trait CredentialTransaction: Send {
    /// Insert a new active record and return its identifier
    ///
    /// # Arguments
    /// * `subject_id` - Owner of the pair
    /// * `access_token` - Access token value
    /// * `refresh_token` - Refresh token value
    async fn insert(
        &mut self,
        subject_id: i64,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<i64, DomainError>;

    /// Exact match on subject and access token among active records
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Active record found
    /// * `Ok(None)` - No active record (never issued, revoked or swept)
    async fn find_active(
        &mut self,
        subject_id: i64,
        access_token: &str,
    ) -> Result<Option<CredentialRecord>, DomainError>;

    /// Find a record by identifier
    async fn find_by_id(&mut self, record_id: i64) -> Result<Option<CredentialRecord>, DomainError>;

    /// Flag a record inactive
    ///
    /// Idempotent: deactivating an inactive or missing record is not an error.
    ///
    /// # Returns
    /// * `Ok(true)` - The record went from active to inactive
    /// * `Ok(false)` - Nothing changed
    async fn deactivate(&mut self, record_id: i64) -> Result<bool, DomainError>;

    /// Hard-delete every record created more than `retention` ago
    ///
    /// Subject and active flag are ignored.
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records deleted
    async fn sweep_expired(&mut self, retention: Duration) -> Result<u64, DomainError>;

    /// Persist everything done in this transaction
    async fn commit(self) -> Result<(), DomainError>;
}
