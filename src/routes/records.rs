//! Record routes: the HTML page with its form posts, and the JSON API.

use crate::handlers::{
    create_record, create_record_form, delete_record_form, index, list_records, read_record, update_record,
};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/records/", post(create_record_form))
        .route("/records", post(create_record_form))
        .route("/records/:id", put(update_record))
        .route("/records/:id/delete", post(delete_record_form))
        .with_state(state)
}

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/records/", get(list_records).post(create_record))
        .route("/api/records", get(list_records).post(create_record))
        .route("/api/records/:id", get(read_record))
        .with_state(state)
}
