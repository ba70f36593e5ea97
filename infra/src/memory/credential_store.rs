//! In-memory credential store with staged transactions

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use ak_core::domain::entities::token::CredentialRecord;
use ak_core::errors::DomainError;
use ak_core::repositories::{CredentialStore, CredentialTransaction};

#[derive(Debug, Clone, Default)]
struct StoreState {
    records: Vec<CredentialRecord>,
    next_id: i64,
}

/// Credential store kept in process memory
///
/// A transaction holds the store lock until it is committed or dropped, so
/// transactions are serialized. Writes are staged on a copy and only become
/// visible on commit.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    state: Arc<Mutex<StoreState>>,
    fail_deactivate: Arc<AtomicBool>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all committed records
    pub async fn records(&self) -> Vec<CredentialRecord> {
        self.state.lock().await.records.clone()
    }

    /// Make `deactivate` fail inside subsequent transactions
    ///
    /// Staged writes of the failing transaction are discarded with it.
    pub fn fail_deactivations(&self, fail: bool) {
        self.fail_deactivate.store(fail, Ordering::SeqCst);
    }

    /// Move a record's creation time into the past
    pub async fn backdate(&self, record_id: i64, age: Duration) {
        let mut state = self.state.lock().await;
        if let Some(record) = state.records.iter_mut().find(|r| r.id == record_id) {
            record.created_at = Utc::now() - age;
        }
    }
}

/// Open transaction on an [`InMemoryCredentialStore`]
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    staged: StoreState,
    fail_deactivate: bool,
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    type Transaction = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction, DomainError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTransaction {
            guard,
            staged,
            fail_deactivate: self.fail_deactivate.load(Ordering::SeqCst),
        })
    }
}

#[async_trait]
impl CredentialTransaction for InMemoryTransaction {
    async fn insert(
        &mut self,
        subject_id: i64,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<i64, DomainError> {
        self.staged.next_id += 1;
        let id = self.staged.next_id;
        self.staged.records.push(CredentialRecord::new(
            id,
            subject_id,
            access_token.to_string(),
            refresh_token.to_string(),
        ));
        Ok(id)
    }

    async fn find_active(
        &mut self,
        subject_id: i64,
        access_token: &str,
    ) -> Result<Option<CredentialRecord>, DomainError> {
        Ok(self
            .staged
            .records
            .iter()
            .find(|r| r.active && r.subject_id == subject_id && r.access_token == access_token)
            .cloned())
    }

    async fn find_by_id(&mut self, record_id: i64) -> Result<Option<CredentialRecord>, DomainError> {
        Ok(self.staged.records.iter().find(|r| r.id == record_id).cloned())
    }

    async fn deactivate(&mut self, record_id: i64) -> Result<bool, DomainError> {
        if self.fail_deactivate {
            return Err(DomainError::credential(format!(
                "deactivate of record {} failed",
                record_id
            )));
        }

        Ok(self
            .staged
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .map(|r| r.deactivate())
            .unwrap_or(false))
    }

    async fn sweep_expired(&mut self, retention: Duration) -> Result<u64, DomainError> {
        let now = Utc::now();
        let before = self.staged.records.len();
        self.staged.records.retain(|r| !r.is_stale(retention, now));
        Ok((before - self.staged.records.len()) as u64)
    }

    async fn commit(self) -> Result<(), DomainError> {
        let InMemoryTransaction {
            mut guard, staged, ..
        } = self;
        *guard = staged;
        Ok(())
    }
}
