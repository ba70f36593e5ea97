//! PostgreSQL implementation of the credential store.
//!
//! Every logical operation runs inside its own database transaction. The
//! transaction is committed explicitly; dropping it rolls back.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use ak_core::domain::entities::token::CredentialRecord;
use ak_core::errors::DomainError;
use ak_core::repositories::{CredentialStore, CredentialTransaction};

/// PostgreSQL implementation of CredentialStore
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// One open transaction on the `tokens` table
pub struct PgCredentialTransaction {
    tx: Transaction<'static, Postgres>,
}

fn store_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!("Credential store failed to {}: {}", action, e);
    DomainError::credential(format!("Failed to {}: {}", action, e))
}

fn row_to_record(row: &PgRow) -> Result<CredentialRecord, DomainError> {
    let get_err = |column: &str, e: sqlx::Error| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    };

    Ok(CredentialRecord {
        id: row.try_get("id").map_err(|e| get_err("id", e))?,
        subject_id: row.try_get("user_id").map_err(|e| get_err("user_id", e))?,
        access_token: row
            .try_get("access_token")
            .map_err(|e| get_err("access_token", e))?,
        refresh_token: row
            .try_get("refresh_token")
            .map_err(|e| get_err("refresh_token", e))?,
        active: row.try_get("status").map_err(|e| get_err("status", e))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_date")
            .map_err(|e| get_err("created_date", e))?,
    })
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    type Transaction = PgCredentialTransaction;

    async fn begin(&self) -> Result<PgCredentialTransaction, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("begin transaction", e))?;
        Ok(PgCredentialTransaction { tx })
    }
}

#[async_trait]
impl CredentialTransaction for PgCredentialTransaction {
    async fn insert(
        &mut self,
        subject_id: i64,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<i64, DomainError> {
        let query = r#"
            INSERT INTO tokens (user_id, access_token, refresh_token, status, created_date)
            VALUES ($1, $2, $3, TRUE, now())
            RETURNING id
        "#;

        sqlx::query_scalar::<_, i64>(query)
            .bind(subject_id)
            .bind(access_token)
            .bind(refresh_token)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| store_error("insert token record", e))
    }

    async fn find_active(
        &mut self,
        subject_id: i64,
        access_token: &str,
    ) -> Result<Option<CredentialRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, access_token, refresh_token, status, created_date
            FROM tokens
            WHERE user_id = $1 AND access_token = $2 AND status = TRUE
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(subject_id)
            .bind(access_token)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| store_error("find token record", e))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn find_by_id(&mut self, record_id: i64) -> Result<Option<CredentialRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, access_token, refresh_token, status, created_date
            FROM tokens
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(record_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| store_error("find token record", e))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn deactivate(&mut self, record_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE tokens SET status = FALSE WHERE id = $1 AND status = TRUE")
            .bind(record_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| store_error("deactivate token record", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn sweep_expired(&mut self, retention: Duration) -> Result<u64, DomainError> {
        // Cutoff uses the database clock, the same one that stamps created_date
        let result = sqlx::query(
            "DELETE FROM tokens WHERE created_date < now() - make_interval(secs => $1)",
        )
        .bind(retention.num_seconds() as f64)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| store_error("sweep token records", e))?;

        if result.rows_affected() > 0 {
            tracing::debug!(
                "Swept {} token records older than {}s",
                result.rows_affected(),
                retention.num_seconds()
            );
        }

        Ok(result.rows_affected())
    }

    async fn commit(self) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| store_error("commit transaction", e))
    }
}
