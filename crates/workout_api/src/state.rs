use std::sync::Arc;

use chrono::NaiveDateTime;
use metrics_exporter_prometheus::PrometheusHandle;
use workout_store::WorkoutStore;

/// Shared request state. Built once at startup; handlers receive clones.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WorkoutStore>,
    pub min_workout_date: NaiveDateTime,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(
        store: Arc<dyn WorkoutStore>,
        min_workout_date: NaiveDateTime,
        metrics: PrometheusHandle,
    ) -> Self {
        Self {
            store,
            min_workout_date,
            metrics,
        }
    }
}
