mod api;
mod config;
mod confirm;
mod error;
mod models;
mod observability;
mod phone;
mod state;
mod store;
mod validate;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::store::SqliteContactStore;

#[tokio::main]
async fn main() -> Result<(), error::AppError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let store = SqliteContactStore::open(&config.database_path)
        .map_err(|err| error::AppError::Internal(format!("failed to open contact store: {err}")))?;
    tracing::info!(path = %config.database_path.display(), "contact store opened");

    let shared_state = Arc::new(state::AppState::new(Arc::new(store)));
    let app = api::rest::router(shared_state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| error::AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| error::AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
