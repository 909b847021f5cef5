//! In-process workout store: the domain model, the `WorkoutStore` contract and
//! a lock-guarded in-memory implementation.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod model;

pub use memory::InMemoryWorkoutStore;
pub use model::{Exercise, ExerciseId, Workout, WorkoutId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("workout {0} not found")]
    NotFound(WorkoutId),
    #[error("workout {0} already exists")]
    Conflict(WorkoutId),
}

/// CRUD access to the authoritative workout collection.
///
/// Implementations must be safe to share between request tasks: every call is
/// linearizable with respect to every other call on the same store.
#[async_trait]
pub trait WorkoutStore: Send + Sync + 'static {
    /// Snapshot of all workouts in insertion order. The returned values are
    /// copies; mutating them does not affect the store.
    async fn list_all(&self) -> Vec<Workout>;

    async fn get_by_id(&self, id: WorkoutId) -> Result<Workout, StoreError>;

    /// Insert a workout under the identity it carries.
    ///
    /// Fails with [`StoreError::Conflict`] if the identity is already taken;
    /// the existing entry is left as it was.
    async fn create(&self, workout: Workout) -> Result<(), StoreError>;

    /// Replace name, description, date and exercises of the workout with the
    /// same identity. Fails with [`StoreError::NotFound`] if there is none.
    async fn update(&self, workout: Workout) -> Result<(), StoreError>;

    /// Remove the workout if present. Removing an unknown identity is a
    /// no-op; the return value tells whether anything was removed.
    async fn delete(&self, id: WorkoutId) -> bool;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
