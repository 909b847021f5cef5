//! Conversion between workout view models and store entities.
//!
//! Identity policy: on create the server assigns fresh ids to the workout and
//! to every exercise, ignoring anything the caller sent. On update the workout
//! id comes from the route, supplied exercise ids are kept and missing ones
//! are generated.

use chrono::NaiveDateTime;
use workout_store::{Exercise, ExerciseId, Workout, WorkoutId};

use crate::domains::validation::{unique_exercise_ids, validate_workout};
use crate::error::{ApiError, ApiResult};
use crate::transforms::{format_workout_date, parse_workout_date};
use crate::types::{ExerciseViewModel, Violation, WorkoutViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExerciseIds {
    Regenerate,
    KeepSupplied,
}

/// Validate a create payload and build a workout with fresh identities.
pub fn workout_for_create(vm: WorkoutViewModel, min_date: NaiveDateTime) -> ApiResult<Workout> {
    let violations = validate_workout(&vm, min_date);
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }
    into_domain(vm, WorkoutId::new(), ExerciseIds::Regenerate)
}

/// Validate an update payload for the workout addressed by `path_id`.
///
/// The payload id must be present and equal to `path_id`; that check runs
/// before any field rule.
pub fn workout_for_update(
    path_id: WorkoutId,
    vm: WorkoutViewModel,
    min_date: NaiveDateTime,
) -> ApiResult<Workout> {
    if vm.id != Some(path_id.as_uuid()) {
        return Err(ApiError::IdentityMismatch {
            path: path_id,
            payload: vm.id,
        });
    }
    let mut violations = validate_workout(&vm, min_date);
    if let Some(exercises) = vm.exercises.as_deref() {
        violations.extend(unique_exercise_ids(exercises));
    }
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }
    into_domain(vm, path_id, ExerciseIds::KeepSupplied)
}

pub fn to_view_model(workout: Workout) -> WorkoutViewModel {
    WorkoutViewModel {
        id: Some(workout.id.as_uuid()),
        name: Some(workout.name),
        description: workout.description,
        date: Some(format_workout_date(workout.date)),
        exercises: Some(
            workout
                .exercises
                .into_iter()
                .map(|ex| ExerciseViewModel {
                    id: Some(ex.id.as_uuid()),
                    name: Some(ex.name),
                    sets: i64::from(ex.sets),
                    repetitions: i64::from(ex.repetitions),
                    weight: i64::from(ex.weight),
                    duration: i64::from(ex.duration),
                })
                .collect(),
        ),
    }
}

// Callers validate first; the errors below only guard against a payload that
// slipped past validation.
fn into_domain(vm: WorkoutViewModel, id: WorkoutId, policy: ExerciseIds) -> ApiResult<Workout> {
    let date = vm
        .date
        .as_deref()
        .and_then(parse_workout_date)
        .ok_or_else(|| invalid("date", "Workout date is required"))?;
    let exercises = vm
        .exercises
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, ex)| exercise_into_domain(i, ex, policy))
        .collect::<ApiResult<Vec<_>>>()?;

    Ok(Workout {
        id,
        name: vm.name.unwrap_or_default(),
        description: vm.description,
        date,
        exercises,
    })
}

fn exercise_into_domain(
    index: usize,
    ex: ExerciseViewModel,
    policy: ExerciseIds,
) -> ApiResult<Exercise> {
    let count = |name: &str, value: i64| {
        u32::try_from(value).map_err(|_| {
            invalid(
                &format!("exercises[{index}].{name}"),
                "must be a non-negative integer",
            )
        })
    };
    let id = match (policy, ex.id) {
        (ExerciseIds::KeepSupplied, Some(id)) => ExerciseId::from(id),
        _ => ExerciseId::new(),
    };
    Ok(Exercise {
        id,
        name: ex.name.unwrap_or_default(),
        sets: count("sets", ex.sets)?,
        repetitions: count("repetitions", ex.repetitions)?,
        weight: count("weight", ex.weight)?,
        duration: count("duration", ex.duration)?,
    })
}

fn invalid(field: &str, message: &str) -> ApiError {
    ApiError::Validation(vec![Violation::new(field, message)])
}
