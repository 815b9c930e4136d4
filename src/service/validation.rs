//! Request payloads, their validation rules, and the response projection of a record.

use crate::error::AppError;
use crate::model::{NewRecord, Record, RecordPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const TITLE_MAX_CHARS: usize = 255;

/// Payloads that must be checked before they reach the store.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// Body of a create request (JSON or form).
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct RecordCreate {
    pub title: String,
    pub content: String,
}

/// Body of an update request; absent fields are left as stored.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct RecordUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Wire representation of a stored record.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct RecordResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn check_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".into()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "title must be at most {} characters",
            TITLE_MAX_CHARS
        )));
    }
    Ok(())
}

fn check_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".into()));
    }
    Ok(())
}

impl Validate for RecordCreate {
    fn validate(&self) -> Result<(), AppError> {
        check_title(&self.title)?;
        check_content(&self.content)
    }
}

impl Validate for RecordUpdate {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(content) = &self.content {
            check_content(content)?;
        }
        Ok(())
    }
}

impl From<RecordCreate> for NewRecord {
    fn from(body: RecordCreate) -> Self {
        NewRecord {
            title: body.title,
            content: body.content,
        }
    }
}

impl From<RecordUpdate> for RecordPatch {
    fn from(body: RecordUpdate) -> Self {
        RecordPatch {
            title: body.title,
            content: body.content,
        }
    }
}

impl From<Record> for RecordResponse {
    fn from(r: Record) -> Self {
        RecordResponse {
            id: r.id,
            title: r.title,
            content: r.content,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
