//! HTTP handlers for the workout resource and the operational endpoints.

use axum::debug_handler;
use axum::{
    Json,
    extract::{OriginalUri, Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info};
use workout_store::WorkoutId;

use crate::domains::workouts::{to_view_model, workout_for_create, workout_for_update};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::WorkoutViewModel;

#[derive(Serialize)]
pub struct HealthReport {
    pub ready: bool,
    pub workouts: usize,
}

fn parse_id(raw: &str) -> ApiResult<WorkoutId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("'{raw}' is not a valid workout id")))
}

#[debug_handler]
pub async fn list_workouts(State(state): State<AppState>) -> Json<Vec<WorkoutViewModel>> {
    let workouts = state.store.list_all().await;
    Json(workouts.into_iter().map(to_view_model).collect())
}

#[debug_handler]
pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WorkoutViewModel>> {
    let id = parse_id(&id)?;
    let workout = state.store.get_by_id(id).await?;
    Ok(Json(to_view_model(workout)))
}

#[debug_handler]
pub async fn create_workout(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<WorkoutViewModel>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(vm) = payload?;
    let workout = workout_for_create(vm, state.min_workout_date)?;
    let id = workout.id;
    state.store.create(workout.clone()).await?;
    info!(%id, "workout created");

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(to_view_model(workout)),
    )
        .into_response())
}

#[debug_handler]
pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<WorkoutViewModel>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let Json(vm) = payload?;
    let workout = workout_for_update(id, vm, state.min_workout_date)?;
    state.store.update(workout).await?;
    info!(%id, "workout updated");
    Ok(StatusCode::NO_CONTENT)
}

#[debug_handler]
pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    if state.store.delete(id).await {
        info!(%id, "workout deleted");
    } else {
        debug!(%id, "delete of unknown workout ignored");
    }
    Ok(StatusCode::NO_CONTENT)
}

#[debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        ready: true,
        workouts: state.store.len().await,
    })
}

#[debug_handler]
pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.render();
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

#[debug_handler]
pub async fn workout_schema() -> impl IntoResponse {
    Json(schemars::schema_for!(WorkoutViewModel))
}
