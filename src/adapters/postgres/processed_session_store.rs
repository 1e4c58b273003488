//! PostgreSQL implementation of ProcessedSessionStore.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::ports::{LedgerError, ProcessedSessionStore};

/// PostgreSQL implementation of the processed-session ledger.
///
/// One row per provisioned checkout session. `mark_processed` uses
/// `ON CONFLICT DO NOTHING` so concurrent redeliveries cannot fail on the
/// primary key.
pub struct PostgresProcessedSessionStore {
    pool: PgPool,
}

impl PostgresProcessedSessionStore {
    /// Creates a new ledger backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcessedSessionStore for PostgresProcessedSessionStore {
    async fn contains(&self, session_id: &str) -> Result<bool, LedgerError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM processed_sessions WHERE session_id = $1)",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LedgerError::Storage(e.to_string()))?;

        Ok(exists)
    }

    async fn mark_processed(&self, session_id: &str) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            INSERT INTO processed_sessions (session_id, processed_at)
            VALUES ($1, NOW())
            ON CONFLICT (session_id) DO NOTHING
            "#,
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| LedgerError::Storage(e.to_string()))?;

        Ok(())
    }
}
