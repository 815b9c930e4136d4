//! Liveness report covering the process and the record store.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DatabaseHealth {
    /// `connected` or `error`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthBody {
    /// `healthy` when the store answered, `degraded` otherwise.
    pub status: String,
    pub database: DatabaseHealth,
    pub environment: String,
}

/// Always answers 200; a storage failure is reported inside the body.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Health report", body = HealthBody))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let (status, database) = match state.store.ping().await {
        Ok(()) => (
            "healthy",
            DatabaseHealth {
                status: "connected".into(),
                message: None,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach the database");
            (
                "degraded",
                DatabaseHealth {
                    status: "error".into(),
                    message: Some(format!("Database connection error: {}", e)),
                },
            )
        }
    };
    Json(HealthBody {
        status: status.into(),
        database,
        environment: state.environment.to_string(),
    })
}
