//! In-memory `WorkoutStore`.
//!
//! Workouts live in a `BTreeMap` keyed by an insertion sequence number, with a
//! `HashMap` index from identity to sequence number. The sequence keeps
//! `list_all` in insertion order across deletes; the index keeps lookups by
//! identity O(1). Both maps sit behind one `RwLock` that every operation holds
//! for its whole duration.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use crate::{StoreError, Workout, WorkoutId, WorkoutStore};

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<u64, Workout>,
    index: HashMap<WorkoutId, u64>,
    next_seq: u64,
}

impl Inner {
    fn get(&self, id: WorkoutId) -> Option<&Workout> {
        self.index.get(&id).and_then(|seq| self.entries.get(seq))
    }

    fn get_mut(&mut self, id: WorkoutId) -> Option<&mut Workout> {
        let seq = self.index.get(&id)?;
        self.entries.get_mut(seq)
    }

    fn insert(&mut self, workout: Workout) -> Result<(), StoreError> {
        if self.index.contains_key(&workout.id) {
            return Err(StoreError::Conflict(workout.id));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(workout.id, seq);
        self.entries.insert(seq, workout);
        Ok(())
    }

    fn remove(&mut self, id: WorkoutId) -> bool {
        match self.index.remove(&id) {
            Some(seq) => self.entries.remove(&seq).is_some(),
            None => false,
        }
    }
}

/// Process-local workout store. Construct one at startup and share it behind
/// an `Arc`; dropping the last handle discards the data.
#[derive(Debug, Default)]
pub struct InMemoryWorkoutStore {
    inner: RwLock<Inner>,
}

impl InMemoryWorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `workouts`, in iteration order.
    pub fn with_workouts(
        workouts: impl IntoIterator<Item = Workout>,
    ) -> Result<Self, StoreError> {
        let mut inner = Inner::default();
        for workout in workouts {
            inner.insert(workout)?;
        }
        Ok(Self {
            inner: RwLock::new(inner),
        })
    }
}

#[async_trait]
impl WorkoutStore for InMemoryWorkoutStore {
    async fn list_all(&self) -> Vec<Workout> {
        let inner = self.inner.read().await;
        inner.entries.values().cloned().collect()
    }

    async fn get_by_id(&self, id: WorkoutId) -> Result<Workout, StoreError> {
        let inner = self.inner.read().await;
        inner.get(id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, workout: Workout) -> Result<(), StoreError> {
        let id = workout.id;
        let mut inner = self.inner.write().await;
        inner.insert(workout)?;
        trace!(%id, total = inner.index.len(), "workout inserted");
        Ok(())
    }

    async fn update(&self, workout: Workout) -> Result<(), StoreError> {
        let id = workout.id;
        let mut inner = self.inner.write().await;
        let current = inner.get_mut(id).ok_or(StoreError::NotFound(id))?;
        current.replace_fields(workout);
        Ok(())
    }

    async fn delete(&self, id: WorkoutId) -> bool {
        let mut inner = self.inner.write().await;
        inner.remove(id)
    }

    async fn len(&self) -> usize {
        self.inner.read().await.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Exercise, ExerciseId};
    use chrono::{NaiveDate, NaiveDateTime};

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date")
    }

    fn workout(name: &str) -> Workout {
        Workout {
            id: WorkoutId::new(),
            name: name.into(),
            description: None,
            date: day(2024, 1, 1),
            exercises: vec![Exercise {
                id: ExerciseId::new(),
                name: "Squat".into(),
                sets: 3,
                repetitions: 10,
                weight: 80,
                duration: 0,
            }],
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_workout() {
        let store = InMemoryWorkoutStore::new();
        let w = workout("Leg Day");
        store.create(w.clone()).await.unwrap();
        assert_eq!(store.get_by_id(w.id).await.unwrap(), w);
    }

    #[tokio::test]
    async fn duplicate_create_is_conflict_and_keeps_original() {
        let store = InMemoryWorkoutStore::new();
        let original = workout("Leg Day");
        store.create(original.clone()).await.unwrap();

        let mut clash = workout("Arm Day");
        clash.id = original.id;
        let err = store.create(clash).await.unwrap_err();
        assert_eq!(err, StoreError::Conflict(original.id));
        assert_eq!(store.get_by_id(original.id).await.unwrap(), original);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_unknown_is_not_found_and_changes_nothing() {
        let store = InMemoryWorkoutStore::new();
        let existing = workout("Leg Day");
        store.create(existing.clone()).await.unwrap();

        let stranger = workout("Ghost");
        let err = store.update(stranger.clone()).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(stranger.id));
        assert_eq!(store.list_all().await, vec![existing]);
    }

    #[tokio::test]
    async fn update_replaces_all_mutable_fields() {
        let store = InMemoryWorkoutStore::new();
        let w = workout("Leg Day");
        store.create(w.clone()).await.unwrap();

        let replacement = Workout {
            id: w.id,
            name: "Leg Day (heavy)".into(),
            description: Some("5x5".into()),
            date: day(2024, 2, 1),
            exercises: vec![],
        };
        store.update(replacement.clone()).await.unwrap();
        assert_eq!(store.get_by_id(w.id).await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn update_keeps_insertion_position() {
        let store = InMemoryWorkoutStore::new();
        let a = workout("A");
        let b = workout("B");
        store.create(a.clone()).await.unwrap();
        store.create(b.clone()).await.unwrap();

        let mut a2 = a.clone();
        a2.name = "A2".into();
        store.update(a2).await.unwrap();

        let names: Vec<_> = store.list_all().await.into_iter().map(|w| w.name).collect();
        assert_eq!(names, ["A2", "B"]);
    }

    #[tokio::test]
    async fn delete_absent_is_noop() {
        let store = InMemoryWorkoutStore::new();
        assert!(!store.delete(WorkoutId::new()).await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = InMemoryWorkoutStore::new();
        let w = workout("Leg Day");
        store.create(w.clone()).await.unwrap();
        assert!(store.delete(w.id).await);
        assert_eq!(
            store.get_by_id(w.id).await.unwrap_err(),
            StoreError::NotFound(w.id)
        );
    }

    #[tokio::test]
    async fn list_all_is_a_detached_copy() {
        let store = InMemoryWorkoutStore::new();
        store.create(workout("Leg Day")).await.unwrap();

        let mut snapshot = store.list_all().await;
        snapshot[0].name = "tampered".into();
        snapshot.clear();

        let fresh = store.list_all().await;
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].name, "Leg Day");
    }

    #[tokio::test]
    async fn with_workouts_rejects_duplicates() {
        let w = workout("Leg Day");
        let res = InMemoryWorkoutStore::with_workouts([w.clone(), w.clone()]);
        assert_eq!(res.unwrap_err(), StoreError::Conflict(w.id));
    }
}
