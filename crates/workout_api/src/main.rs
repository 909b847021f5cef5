use std::sync::Arc;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tracing::info;

use workout_api::{AppState, LoggingStore, ServerConfig, build_router};
use workout_store::{InMemoryWorkoutStore, WorkoutStore};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Configure logging from env var `WORKOUT_API_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("WORKOUT_API_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(log_env.clone())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!(%log_env, "workout_api: log filter");

    let config = ServerConfig::from_env()?;
    let metrics = PrometheusBuilder::new().install_recorder()?;

    // The one store for the lifetime of the process.
    let store: Arc<dyn WorkoutStore> = Arc::new(LoggingStore::new(InMemoryWorkoutStore::new()));
    let state = AppState::new(store, config.min_workout_date, metrics);
    let app = build_router(state, &config);

    let addr = config.address;
    info!(
        %addr,
        max_body_bytes = config.max_body_bytes,
        timeout_secs = config.request_timeout.as_secs(),
        cors = %config.cors_allowed_origins,
        "starting HTTP server"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to address {addr}"))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
            info!("shutdown requested");
        })
        .await?;

    Ok(())
}
