//! Recordbook: a small record keeping web application over PostgreSQL, with
//! server-rendered pages and a parallel JSON API.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use config::{DatabaseSettings, Settings};
pub use error::{AppError, ConfigError, StartupError, StoreError};
pub use migration::{ensure_database_exists, ensure_records_table, initialize_schema};
pub use model::{ListWindow, NewRecord, Record, RecordPatch};
pub use routes::app;
pub use service::RecordService;
pub use state::AppState;
pub use store::{PgRecordStore, RecordStore};
