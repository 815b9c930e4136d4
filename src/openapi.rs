//! OpenAPI document for the JSON endpoints.

use crate::error::ErrorBody;
use crate::handlers::health::{DatabaseHealth, HealthBody};
use crate::service::{RecordCreate, RecordResponse, RecordUpdate};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Records API",
        description = "Create, read, update and delete records stored in PostgreSQL"
    ),
    paths(
        crate::handlers::records::list_records,
        crate::handlers::records::create_record,
        crate::handlers::records::read_record,
        crate::handlers::records::update_record,
        crate::handlers::health::health,
    ),
    components(schemas(
        RecordCreate,
        RecordUpdate,
        RecordResponse,
        ErrorBody,
        HealthBody,
        DatabaseHealth
    ))
)]
pub struct ApiDoc;
