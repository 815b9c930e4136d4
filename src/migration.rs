//! Startup bootstrap: create the database and the `records` table, retrying while the
//! server is unreachable.

use crate::config::{is_safe_identifier, DatabaseSettings};
use crate::error::StoreError;
use sqlx::{ConnectOptions, Connection, PgConnection};
use std::future::Future;
use std::time::Duration;

const RECORDS_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS records (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_records_title ON records (title)",
    "CREATE INDEX IF NOT EXISTS ix_records_created_at ON records (created_at DESC)",
];

/// How a retried bootstrap ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Succeeded { attempts: u32 },
    FailedPermanently { attempts: u32, last_error: String },
}

impl InitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InitOutcome::Succeeded { .. })
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Creates the configured database if the server does not have it yet.
/// The existence check is parameterized; the name is spliced into `CREATE DATABASE` only
/// after it passed the safe identifier check.
pub async fn ensure_database_exists(settings: &DatabaseSettings) -> Result<(), StoreError> {
    if !is_safe_identifier(&settings.name) {
        return Err(StoreError::InvalidIdentifier(settings.name.clone()));
    }
    let mut conn: PgConnection = settings.admin_connect_options().connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&settings.name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %settings.name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&settings.name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %settings.name, "database created");
    }
    conn.close().await?;
    Ok(())
}

/// Creates the `records` table and its indexes. Idempotent.
pub async fn ensure_records_table(conn: &mut PgConnection) -> Result<(), StoreError> {
    for ddl in RECORDS_DDL {
        sqlx::query(ddl).execute(&mut *conn).await?;
    }
    Ok(())
}

async fn initialize_once(settings: &DatabaseSettings) -> Result<(), StoreError> {
    ensure_database_exists(settings).await?;
    let mut conn: PgConnection = settings.connect_options().connect().await?;
    ensure_records_table(&mut conn).await?;
    conn.close().await?;
    tracing::info!(database = %settings.name, "records table initialized");
    Ok(())
}

/// Runs `attempt` up to `max_retries` times (at least once), sleeping `retry_delay` between
/// failures.
pub async fn retry_startup<F, Fut>(max_retries: u32, retry_delay: Duration, mut attempt: F) -> InitOutcome
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(), StoreError>>,
{
    let max_retries = max_retries.max(1);
    let mut current = 1;
    loop {
        match attempt(current).await {
            Ok(()) => return InitOutcome::Succeeded { attempts: current },
            Err(e) if current < max_retries => {
                tracing::warn!(
                    attempt = current,
                    max_retries,
                    delay_secs = retry_delay.as_secs_f64(),
                    error = %e,
                    "database initialization failed, retrying"
                );
                tokio::time::sleep(retry_delay).await;
                current += 1;
            }
            Err(e) => {
                tracing::error!(attempts = current, error = %e, "database initialization failed");
                return InitOutcome::FailedPermanently {
                    attempts: current,
                    last_error: e.to_string(),
                };
            }
        }
    }
}

/// Ensures database and table exist. Returns false once retries are exhausted; the
/// caller decides whether to abort.
pub async fn initialize_schema(settings: &DatabaseSettings, max_retries: u32, retry_delay: Duration) -> bool {
    if !is_safe_identifier(&settings.name) {
        tracing::error!(database = %settings.name, "refusing to create database with unsafe name");
        return false;
    }
    retry_startup(max_retries, retry_delay, |_| initialize_once(settings))
        .await
        .is_success()
}
