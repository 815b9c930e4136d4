//! Record handlers: JSON API plus the form posts used by the HTML page.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ValidForm, ValidJson};
use crate::model::ListWindow;
use crate::service::{RecordCreate, RecordResponse, RecordService, RecordUpdate};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Redirect,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid record id '{}'", id_str)))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Records to skip (default 0).
    pub skip: Option<i64>,
    /// Page size (default and maximum 100).
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/records/",
    params(ListParams),
    responses(
        (status = 200, description = "Records, newest first", body = [RecordResponse]),
        (status = 422, description = "Invalid pagination", body = ErrorBody)
    )
)]
pub async fn list_records(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<RecordResponse>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    let window = ListWindow::page(params.skip, params.limit)?;
    let records = RecordService::list(state.store.as_ref(), window).await?;
    Ok(Json(records))
}

#[utoipa::path(
    post,
    path = "/api/records/",
    request_body = RecordCreate,
    responses(
        (status = 200, description = "Created record", body = RecordResponse),
        (status = 422, description = "Invalid body", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn create_record(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<RecordCreate>,
) -> Result<Json<RecordResponse>, AppError> {
    let record = RecordService::create(state.store.as_ref(), body.into()).await?;
    Ok(Json(record))
}

#[utoipa::path(
    get,
    path = "/api/records/{id}",
    params(("id" = i64, Path, description = "Record id")),
    responses(
        (status = 200, description = "The record", body = RecordResponse),
        (status = 404, description = "Record not found", body = ErrorBody)
    )
)]
pub async fn read_record(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<RecordResponse>, AppError> {
    let id = parse_id(&id_str)?;
    let record = RecordService::read(state.store.as_ref(), id).await?;
    Ok(Json(record))
}

#[utoipa::path(
    put,
    path = "/records/{id}",
    params(("id" = i64, Path, description = "Record id")),
    request_body = RecordUpdate,
    responses(
        (status = 200, description = "Updated record", body = RecordResponse),
        (status = 404, description = "Record not found", body = ErrorBody),
        (status = 422, description = "Invalid body", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn update_record(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidJson(body): ValidJson<RecordUpdate>,
) -> Result<Json<RecordResponse>, AppError> {
    let id = parse_id(&id_str)?;
    let record = RecordService::update(state.store.as_ref(), id, body.into()).await?;
    Ok(Json(record))
}

/// Form post from the index page; redirects back to it (303).
pub async fn create_record_form(
    State(state): State<AppState>,
    ValidForm(body): ValidForm<RecordCreate>,
) -> Result<Redirect, AppError> {
    RecordService::create(state.store.as_ref(), body.into()).await?;
    Ok(Redirect::to("/"))
}

/// Delete button on the index page; redirects back to it (303).
pub async fn delete_record_form(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id_str)?;
    RecordService::delete(state.store.as_ref(), id).await?;
    Ok(Redirect::to("/"))
}
