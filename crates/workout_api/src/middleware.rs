//! Store decorator for cross-cutting concerns.
//!
//! `LoggingStore` sits between the HTTP handlers and the real store and adds:
//! - debug logging of each operation with its duration and outcome
//! - `workout_store_operations_total{op,outcome}` counters
//! - `workout_store_operation_seconds{op}` histograms

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;
use workout_store::{StoreError, Workout, WorkoutId, WorkoutStore};

#[derive(Clone)]
pub struct LoggingStore<S: WorkoutStore> {
    inner: Arc<S>,
}

impl<S: WorkoutStore> LoggingStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Execute a fallible operation with logging.
    async fn with_logging<F, Fut, T>(&self, operation: F, name: &'static str) -> Result<T, StoreError>
    where
        F: FnOnce(Arc<S>) -> Fut,
        Fut: std::future::Future<Output = Result<T, StoreError>>,
    {
        let start = Instant::now();
        debug!("Starting store operation: {}", name);

        let result = operation(self.inner.clone()).await;

        let duration = start.elapsed();
        let outcome = match &result {
            Ok(_) => {
                debug!("Store operation completed: {} in {:?}", name, duration);
                "ok"
            }
            Err(e) => {
                debug!("Store operation failed: {} in {:?} - error: {}", name, duration, e);
                match e {
                    StoreError::NotFound(_) => "not_found",
                    StoreError::Conflict(_) => "conflict",
                }
            }
        };
        record(name, outcome, duration);

        result
    }
}

fn record(op: &'static str, outcome: &'static str, duration: Duration) {
    metrics::counter!("workout_store_operations_total", "op" => op, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("workout_store_operation_seconds", "op" => op)
        .record(duration.as_secs_f64());
}

#[async_trait::async_trait]
impl<S: WorkoutStore> WorkoutStore for LoggingStore<S> {
    async fn list_all(&self) -> Vec<Workout> {
        let start = Instant::now();
        let workouts = self.inner.list_all().await;
        let duration = start.elapsed();
        debug!(
            "Store operation completed: list_all ({} workouts) in {:?}",
            workouts.len(),
            duration
        );
        record("list_all", "ok", duration);
        workouts
    }

    async fn get_by_id(&self, id: WorkoutId) -> Result<Workout, StoreError> {
        self.with_logging(|store| async move { store.get_by_id(id).await }, "get_by_id")
            .await
    }

    async fn create(&self, workout: Workout) -> Result<(), StoreError> {
        self.with_logging(|store| async move { store.create(workout).await }, "create")
            .await
    }

    async fn update(&self, workout: Workout) -> Result<(), StoreError> {
        self.with_logging(|store| async move { store.update(workout).await }, "update")
            .await
    }

    async fn delete(&self, id: WorkoutId) -> bool {
        let start = Instant::now();
        let removed = self.inner.delete(id).await;
        let duration = start.elapsed();
        debug!(%id, removed, "Store operation completed: delete in {:?}", duration);
        record("delete", if removed { "ok" } else { "absent" }, duration);
        removed
    }

    async fn len(&self) -> usize {
        self.inner.len().await
    }
}
