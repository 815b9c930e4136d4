//! HTML page handlers.

use crate::error::AppError;
use crate::model::ListWindow;
use crate::service::RecordService;
use crate::state::AppState;
use axum::{extract::State, response::Html};

/// GET /: every record, newest first, plus the creation form.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let records = RecordService::list(state.store.as_ref(), ListWindow::all()).await?;
    Ok(Html(state.views.index_page(&records)?))
}
