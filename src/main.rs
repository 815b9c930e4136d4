//! Server binary: loads settings, bootstraps the database, serves until interrupted.

use recordbook::views::Views;
use recordbook::{app, initialize_schema, AppState, PgRecordStore, Settings, StartupError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recordbook=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(
        environment = %settings.environment,
        database = %settings.database.name,
        host = %settings.database.host,
        "starting"
    );

    if !initialize_schema(&settings.database, settings.init_max_retries, settings.init_retry_delay).await {
        return Err(StartupError::SchemaInitialization {
            database: settings.database.name.clone(),
        });
    }

    let views = Views::load()?;
    let store = PgRecordStore::connect(&settings.database).await?;
    let state = AppState::new(Arc::new(store.clone()), settings.environment.clone(), views);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
