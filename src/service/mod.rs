//! RecordService and the request validation it relies on.

mod records;
mod validation;
pub use records::RecordService;
pub use validation::{RecordCreate, RecordResponse, RecordUpdate, Validate, TITLE_MAX_CHARS};
