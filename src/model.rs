//! The `records` table row and the inputs that create or change it.

use crate::error::AppError;
use chrono::{DateTime, Utc};

/// Largest page the JSON API hands out in one response.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A persisted record. `id`, `created_at` are assigned by the store and never change.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated fields for a new record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecord {
    pub title: String,
    pub content: String,
}

/// Validated partial update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Record {
    /// Applies the present fields of `patch`. Timestamps are the store's concern.
    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
    }
}

/// Pagination window over records ordered newest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListWindow {
    pub offset: i64,
    /// `None` means no limit.
    pub limit: Option<i64>,
}

impl ListWindow {
    /// Window for the JSON API: offset defaults to 0, limit to 100 and is capped at 100.
    pub fn page(offset: Option<i64>, limit: Option<i64>) -> Result<Self, AppError> {
        let offset = offset.unwrap_or(0);
        let limit = limit.unwrap_or(MAX_PAGE_SIZE);
        if offset < 0 {
            return Err(AppError::Validation("skip must be a non-negative integer".into()));
        }
        if limit < 0 {
            return Err(AppError::Validation("limit must be a non-negative integer".into()));
        }
        Ok(ListWindow {
            offset,
            limit: Some(limit.min(MAX_PAGE_SIZE)),
        })
    }

    /// Every record, used by the HTML listing.
    pub fn all() -> Self {
        ListWindow {
            offset: 0,
            limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let now = Utc::now();
        Record {
            id: 1,
            title: "T".into(),
            content: "C".into(),
            created_at: now,
            updated_at: Some(now),
        }
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut record = sample();
        record.apply(&RecordPatch {
            title: Some("T2".into()),
            content: None,
        });
        assert_eq!(record.title, "T2");
        assert_eq!(record.content, "C");
    }

    #[test]
    fn page_defaults_and_caps_limit() {
        assert_eq!(
            ListWindow::page(None, None).unwrap(),
            ListWindow { offset: 0, limit: Some(100) }
        );
        assert_eq!(ListWindow::page(Some(5), Some(1000)).unwrap().limit, Some(100));
        assert_eq!(ListWindow::page(None, Some(0)).unwrap().limit, Some(0));
    }

    #[test]
    fn page_rejects_negative_values() {
        assert!(matches!(ListWindow::page(Some(-1), None), Err(AppError::Validation(_))));
        assert!(matches!(ListWindow::page(None, Some(-3)), Err(AppError::Validation(_))));
    }
}
