//! Common routes: health, API document and its Swagger UI.

use crate::handlers::health;
use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// GET /health, GET /openapi.json, GET /docs.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}
