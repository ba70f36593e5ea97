//! Mock implementation of CredentialStore for testing

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex};

use crate::domain::entities::token::CredentialRecord;
use crate::errors::DomainError;

use super::r#trait::{CredentialStore, CredentialTransaction};

#[derive(Default)]
struct MockState {
    records: Vec<CredentialRecord>,
    next_id: i64,
    commits: usize,
    fail_writes: bool,
}

/// Mock credential store for testing
///
/// Writes are applied immediately; `commit` only counts calls.
#[derive(Clone, Default)]
pub struct MockCredentialStore {
    state: Arc<Mutex<MockState>>,
}

impl MockCredentialStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a credential error
    pub fn fail_writes(&self) {
        self.state.lock().unwrap().fail_writes = true;
    }

    /// Move a record's creation time into the past
    pub fn backdate(&self, record_id: i64, age: Duration) {
        let mut state = self.state.lock().unwrap();
        if let Some(record) = state.records.iter_mut().find(|r| r.id == record_id) {
            record.created_at = Utc::now() - age;
        }
    }

    /// Snapshot of all stored records
    pub fn records(&self) -> Vec<CredentialRecord> {
        self.state.lock().unwrap().records.clone()
    }

    /// Number of committed transactions
    pub fn commits(&self) -> usize {
        self.state.lock().unwrap().commits
    }
}

/// Transaction over the mock store
pub struct MockTransaction {
    state: Arc<Mutex<MockState>>,
}

impl MockTransaction {
    fn check_writable(&self) -> Result<(), DomainError> {
        if self.state.lock().unwrap().fail_writes {
            return Err(DomainError::credential("mock store is failing writes"));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    type Transaction = MockTransaction;

    async fn begin(&self) -> Result<MockTransaction, DomainError> {
        Ok(MockTransaction {
            state: Arc::clone(&self.state),
        })
    }
}

#[async_trait]
impl CredentialTransaction for MockTransaction {
    async fn insert(
        &mut self,
        subject_id: i64,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<i64, DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.records.push(CredentialRecord::new(
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
        let state = self.state.lock().unwrap();
        Ok(state
            .records
            .iter()
            .find(|r| r.active && r.subject_id == subject_id && r.access_token == access_token)
            .cloned())
    }

    async fn find_by_id(&mut self, record_id: i64) -> Result<Option<CredentialRecord>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.records.iter().find(|r| r.id == record_id).cloned())
    }

    async fn deactivate(&mut self, record_id: i64) -> Result<bool, DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        Ok(state
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .map(|r| r.deactivate())
            .unwrap_or(false))
    }

    async fn sweep_expired(&mut self, retention: Duration) -> Result<u64, DomainError> {
        self.check_writable()?;
        let now = Utc::now();
        let mut state = self.state.lock().unwrap();
        let before = state.records.len();
        state.records.retain(|r| !r.is_stale(retention, now));
        Ok((before - state.records.len()) as u64)
    }

    async fn commit(self) -> Result<(), DomainError> {
        self.state.lock().unwrap().commits += 1;
        Ok(())
    }
}
