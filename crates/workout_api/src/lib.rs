//! HTTP transport for the workout store.
//!
//! Handlers validate and map payloads, call the store, and map results and
//! store errors back to HTTP. The store itself is injected through
//! [`AppState`]; this crate never constructs one implicitly.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::timeout::TimeoutLayer;

pub mod auth;
pub mod config;
pub mod cors;
pub mod domains;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod transforms;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use auth::BearerAuth;
pub use config::{ConfigError, ServerConfig};
pub use cors::AllowedOrigins;
pub use error::{ApiError, ApiResult};
pub use middleware::LoggingStore;
pub use state::AppState;
pub use types::{ExerciseViewModel, Violation, WorkoutViewModel};

/// Every version serves the same workout resource.
pub const API_VERSIONS: [&str; 2] = ["v1", "v2"];

/// Assemble the full application: versioned workout routes (behind bearer
/// auth when a secret is configured), the operational endpoints, and the
/// body limit, timeout and CORS layers.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut workouts: Router<AppState> = Router::new();
    for version in API_VERSIONS {
        let base = format!("/api/{version}/workout");
        workouts = workouts
            .route(
                &base,
                get(routes::list_workouts).post(routes::create_workout),
            )
            .route(
                &format!("{base}/{{id}}"),
                get(routes::get_workout)
                    .put(routes::update_workout)
                    .delete(routes::delete_workout),
            );
    }

    if let Some(secret) = &config.jwt_secret {
        let auth = Arc::new(BearerAuth::new(secret, config.jwt_audience.clone()));
        workouts = workouts.route_layer(axum::middleware::from_fn_with_state(
            auth,
            auth::require_bearer,
        ));
        tracing::info!(audience = %config.jwt_audience, "bearer authentication enabled");
    }

    Router::new()
        .route("/health", get(routes::health))
        .route("/metrics", get(routes::metrics_endpoint))
        .route("/api/schema", get(routes::workout_schema))
        .merge(workouts)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors::cors_layer(&config.cors_allowed_origins))
        .with_state(state)
}
