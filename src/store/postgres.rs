//! PostgreSQL-backed store. Each operation runs inside a [`RecordSession`] (one transaction).

use super::RecordStore;
use crate::config::DatabaseSettings;
use crate::error::StoreError;
use crate::model::{ListWindow, NewRecord, Record, RecordPatch};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Duration;

const RECORD_COLUMNS: &str = "id, title, content, created_at, updated_at";

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Builds the pool. Connections are pinged before reuse.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .test_before_acquire(true)
            .connect_with(settings.connect_options())
            .await?;
        tracing::info!(database = %settings.name, host = %settings.host, "connected record store");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        PgRecordStore { pool }
    }

    /// Starts a scoped session. Dropping it without [`RecordSession::finish`] rolls back.
    pub async fn open_session(&self) -> Result<RecordSession, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(RecordSession { tx })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A transaction bound to one request.
pub struct RecordSession {
    tx: Transaction<'static, Postgres>,
}

impl RecordSession {
    pub async fn insert(&mut self, record: &NewRecord) -> Result<Record, StoreError> {
        let sql = format!(
            "INSERT INTO records (title, content) VALUES ($1, $2) RETURNING {}",
            RECORD_COLUMNS
        );
        let row = sqlx::query_as::<_, Record>(&sql)
            .bind(&record.title)
            .bind(&record.content)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    pub async fn list(&mut self, window: ListWindow) -> Result<Vec<Record>, StoreError> {
        let sql = format!(
            "SELECT {} FROM records ORDER BY created_at DESC, id DESC OFFSET $1 LIMIT $2",
            RECORD_COLUMNS
        );
        let rows = sqlx::query_as::<_, Record>(&sql)
            .bind(window.offset)
            .bind(window.limit)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    pub async fn get(&mut self, id: i64) -> Result<Option<Record>, StoreError> {
        self.fetch(id, false).await
    }

    /// Reads the row, applies `patch` and writes both fields back with a fresh `updated_at`.
    pub async fn update(&mut self, id: i64, patch: &RecordPatch) -> Result<Record, StoreError> {
        let mut record = self.fetch(id, true).await?.ok_or(StoreError::NotFound(id))?;
        record.apply(patch);
        let sql = format!(
            "UPDATE records SET title = $2, content = $3, updated_at = clock_timestamp() \
             WHERE id = $1 RETURNING {}",
            RECORD_COLUMNS
        );
        let row = sqlx::query_as::<_, Record>(&sql)
            .bind(id)
            .bind(&record.title)
            .bind(&record.content)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let deleted: Option<(i64,)> = sqlx::query_as("DELETE FROM records WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        deleted.map(|_| ()).ok_or(StoreError::NotFound(id))
    }

    pub async fn ping(&mut self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&mut *self.tx).await?;
        Ok(())
    }

    /// Commits when `result` is Ok, otherwise rolls back and hands the error back.
    pub async fn finish<T>(self, operation: &'static str, result: Result<T, StoreError>) -> Result<T, StoreError> {
        match result {
            Ok(value) => {
                self.tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                match &e {
                    StoreError::NotFound(id) => tracing::debug!(operation, id, "record not found"),
                    other => tracing::error!(operation, error = %other, "rolling back record session"),
                }
                if let Err(rollback) = self.tx.rollback().await {
                    tracing::error!(operation, error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn fetch(&mut self, id: i64, for_update: bool) -> Result<Option<Record>, StoreError> {
        let lock = if for_update { " FOR UPDATE" } else { "" };
        let sql = format!("SELECT {} FROM records WHERE id = $1{}", RECORD_COLUMNS, lock);
        let row = sqlx::query_as::<_, Record>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: NewRecord) -> Result<Record, StoreError> {
        let mut session = self.open_session().await?;
        let result = session.insert(&record).await;
        session.finish("insert", result).await
    }

    async fn list(&self, window: ListWindow) -> Result<Vec<Record>, StoreError> {
        let mut session = self.open_session().await?;
        let result = session.list(window).await;
        session.finish("list", result).await
    }

    async fn get(&self, id: i64) -> Result<Option<Record>, StoreError> {
        let mut session = self.open_session().await?;
        let result = session.get(id).await;
        session.finish("get", result).await
    }

    async fn update(&self, id: i64, patch: RecordPatch) -> Result<Record, StoreError> {
        let mut session = self.open_session().await?;
        let result = session.update(id, &patch).await;
        session.finish("update", result).await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut session = self.open_session().await?;
        let result = session.delete(id).await;
        session.finish("delete", result).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut session = self.open_session().await?;
        let result = session.ping().await;
        session.finish("ping", result).await
    }
}
