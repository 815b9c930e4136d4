//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Detail returned for every lookup of a missing record.
pub const RECORD_NOT_FOUND: &str = "Record not found";

const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(i64),
    #[error("unsafe database identifier: {0}")]
    InvalidIdentifier(String),
    #[error("database: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Fatal conditions that keep the process from serving requests.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("schema initialization failed for database '{database}'")]
    SchemaInitialization { database: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("templates: {0}")]
    Template(#[from] tera::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(StoreError),
    #[error("render: {0}")]
    Render(#[from] tera::Error),
}

impl AppError {
    pub fn record_not_found() -> Self {
        AppError::NotFound(RECORD_NOT_FOUND.into())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => AppError::record_not_found(),
            other => AppError::Store(other),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "render_error"),
        };
        let detail = match &self {
            AppError::Store(e) => {
                tracing::error!(error = %e, "request failed on storage error");
                INTERNAL_ERROR.to_string()
            }
            AppError::Render(e) => {
                tracing::error!(error = %e, "page rendering failed");
                INTERNAL_ERROR.to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            detail,
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
