//! In-process store used by router tests.

use super::RecordStore;
use crate::error::StoreError;
use crate::model::{ListWindow, NewRecord, Record, RecordPatch};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Record>,
    next_id: i64,
    last_stamp: Option<DateTime<Utc>>,
}

impl Inner {
    /// Strictly increasing clock so ordering and `updated_at` checks are deterministic.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
    unavailable: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like a lost connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: NewRecord) -> Result<Record, StoreError> {
        self.check()?;
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        let now = inner.stamp();
        let row = Record {
            id,
            title: record.title,
            content: record.content,
            created_at: now,
            updated_at: Some(now),
        };
        inner.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn list(&self, window: ListWindow) -> Result<Vec<Record>, StoreError> {
        self.check()?;
        let inner = self.lock();
        let mut rows: Vec<Record> = inner.rows.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let rows = rows.into_iter().skip(window.offset as usize);
        Ok(match window.limit {
            Some(limit) => rows.take(limit as usize).collect(),
            None => rows.collect(),
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Record>, StoreError> {
        self.check()?;
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, patch: RecordPatch) -> Result<Record, StoreError> {
        self.check()?;
        let mut inner = self.lock();
        let now = inner.stamp();
        let row = inner.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        row.apply(&patch);
        row.updated_at = Some(now);
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.check()?;
        self.lock().rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}
