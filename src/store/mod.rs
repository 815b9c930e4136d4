//! Record persistence. Handlers only ever see [`RecordStore`]; every call is one unit of work.

mod postgres;
#[cfg(test)]
pub(crate) mod memory;

pub use postgres::{PgRecordStore, RecordSession};

use crate::error::StoreError;
use crate::model::{ListWindow, NewRecord, Record, RecordPatch};
use async_trait::async_trait;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a new record; the store assigns `id`, `created_at` and `updated_at`.
    async fn insert(&self, record: NewRecord) -> Result<Record, StoreError>;

    /// Records ordered by `created_at` descending, restricted to `window`.
    async fn list(&self, window: ListWindow) -> Result<Vec<Record>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Record>, StoreError>;

    /// Applies `patch` and refreshes `updated_at`. `StoreError::NotFound` when `id` is absent.
    async fn update(&self, id: i64, patch: RecordPatch) -> Result<Record, StoreError>;

    /// Hard delete. `StoreError::NotFound` when `id` is absent.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Trivial round trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
