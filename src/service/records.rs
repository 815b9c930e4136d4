//! RecordService: orchestrates validated input, the store, and response projection.

use crate::error::AppError;
use crate::model::{ListWindow, NewRecord, RecordPatch};
use crate::service::RecordResponse;
use crate::store::RecordStore;

pub struct RecordService;

impl RecordService {
    pub async fn create(store: &dyn RecordStore, record: NewRecord) -> Result<RecordResponse, AppError> {
        let row = store.insert(record).await?;
        tracing::info!(id = row.id, "record created");
        Ok(row.into())
    }

    /// Newest first, within `window`.
    pub async fn list(store: &dyn RecordStore, window: ListWindow) -> Result<Vec<RecordResponse>, AppError> {
        let rows = store.list(window).await?;
        Ok(rows.into_iter().map(RecordResponse::from).collect())
    }

    pub async fn read(store: &dyn RecordStore, id: i64) -> Result<RecordResponse, AppError> {
        store
            .get(id)
            .await?
            .map(RecordResponse::from)
            .ok_or_else(AppError::record_not_found)
    }

    pub async fn update(store: &dyn RecordStore, id: i64, patch: RecordPatch) -> Result<RecordResponse, AppError> {
        if store.get(id).await?.is_none() {
            return Err(AppError::record_not_found());
        }
        let row = store.update(id, patch).await?;
        tracing::info!(id, "record updated");
        Ok(row.into())
    }

    pub async fn delete(store: &dyn RecordStore, id: i64) -> Result<(), AppError> {
        if store.get(id).await?.is_none() {
            return Err(AppError::record_not_found());
        }
        store.delete(id).await?;
        tracing::info!(id, "record deleted");
        Ok(())
    }
}
