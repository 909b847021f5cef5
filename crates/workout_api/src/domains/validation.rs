//! Field rules for workout payloads.
//!
//! Each rule is a pure predicate returning the violation it detects, if any.
//! `validate_workout` runs all of them and returns the full list; it never
//! stops at the first failure.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::transforms::parse_workout_date;
use crate::types::{ExerciseViewModel, Violation, WorkoutViewModel};

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Present and not blank.
pub fn required(field: &str, value: Option<&str>, message: &str) -> Option<Violation> {
    match value {
        Some(v) if !v.trim().is_empty() => None,
        _ => Some(Violation::new(field, message)),
    }
}

/// Absent values pass; pair with [`required`] when the field is mandatory.
pub fn max_chars(field: &str, value: Option<&str>, max: usize, message: &str) -> Option<Violation> {
    value
        .filter(|v| v.chars().count() > max)
        .map(|_| Violation::new(field, message))
}

pub fn date_on_or_after(field: &str, value: Option<&str>, floor: NaiveDateTime) -> Option<Violation> {
    let message = || {
        format!(
            "Workout date must be on or after {}",
            floor.format("%Y-%m-%d")
        )
    };
    match value {
        None => Some(Violation::new(field, "Workout date is required")),
        Some(raw) => match parse_workout_date(raw) {
            None => Some(Violation::new(field, format!("'{raw}' is not a valid date"))),
            Some(date) if date < floor => Some(Violation::new(field, message())),
            Some(_) => None,
        },
    }
}

pub fn non_empty<T>(field: &str, items: Option<&[T]>, message: &str) -> Option<Violation> {
    match items {
        Some(items) if !items.is_empty() => None,
        _ => Some(Violation::new(field, message)),
    }
}

/// The value must fit the domain's unsigned 32-bit counters.
pub fn non_negative(field: &str, value: i64, label: &str) -> Option<Violation> {
    if u32::try_from(value).is_ok() {
        None
    } else {
        Some(Violation::new(
            field,
            format!("{label} must be between 0 and {}", u32::MAX),
        ))
    }
}

/// Exercise ids supplied in one payload must not repeat.
pub fn unique_exercise_ids(exercises: &[ExerciseViewModel]) -> Vec<Violation> {
    let mut seen = HashSet::new();
    exercises
        .iter()
        .enumerate()
        .filter_map(|(i, ex)| {
            let id = ex.id?;
            (!seen.insert(id)).then(|| {
                Violation::new(
                    format!("exercises[{i}].id"),
                    format!("Exercise id {id} appears more than once"),
                )
            })
        })
        .collect()
}

pub fn validate_exercise(index: usize, ex: &ExerciseViewModel) -> Vec<Violation> {
    let field = |name: &str| format!("exercises[{index}].{name}");
    let name = ex.name.as_deref();

    let mut violations = Vec::new();
    violations.extend(required(&field("name"), name, "Exercise name is required"));
    violations.extend(max_chars(
        &field("name"),
        name,
        NAME_MAX_CHARS,
        "Exercise name cannot be longer than 100 characters",
    ));
    violations.extend(non_negative(&field("sets"), ex.sets, "Sets"));
    violations.extend(non_negative(&field("repetitions"), ex.repetitions, "Repetitions"));
    violations.extend(non_negative(&field("weight"), ex.weight, "Weight"));
    violations.extend(non_negative(&field("duration"), ex.duration, "Duration"));
    violations
}

/// Every rule a workout payload must satisfy before it may reach the store.
pub fn validate_workout(vm: &WorkoutViewModel, min_date: NaiveDateTime) -> Vec<Violation> {
    let name = vm.name.as_deref();

    let mut violations = Vec::new();
    violations.extend(required("name", name, "Workout name is required"));
    violations.extend(max_chars(
        "name",
        name,
        NAME_MAX_CHARS,
        "Workout name cannot be longer than 100 characters",
    ));
    violations.extend(max_chars(
        "description",
        vm.description.as_deref(),
        DESCRIPTION_MAX_CHARS,
        "Description cannot be longer than 500 characters",
    ));
    violations.extend(date_on_or_after("date", vm.date.as_deref(), min_date));
    violations.extend(non_empty(
        "exercises",
        vm.exercises.as_deref(),
        "At least one exercise is required",
    ));
    for (i, ex) in vm.exercises.iter().flatten().enumerate() {
        violations.extend(validate_exercise(i, ex));
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{floor_2020, leg_day_vm, squat_vm};
    use uuid::Uuid;

    fn fields(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn valid_payload_has_no_violations() {
        assert!(validate_workout(&leg_day_vm(), floor_2020()).is_empty());
    }

    #[test]
    fn blank_name_is_required_violation() {
        let mut vm = leg_day_vm();
        vm.name = Some("   ".into());
        let v = validate_workout(&vm, floor_2020());
        assert_eq!(fields(&v), ["name"]);
        assert_eq!(v[0].message, "Workout name is required");
    }

    #[test]
    fn name_limit_counts_characters_not_bytes() {
        let mut vm = leg_day_vm();
        vm.name = Some("é".repeat(100));
        assert!(validate_workout(&vm, floor_2020()).is_empty());

        vm.name = Some("é".repeat(101));
        assert_eq!(fields(&validate_workout(&vm, floor_2020())), ["name"]);
    }

    #[test]
    fn description_limit() {
        let mut vm = leg_day_vm();
        vm.description = Some("x".repeat(500));
        assert!(validate_workout(&vm, floor_2020()).is_empty());
        vm.description = Some("x".repeat(501));
        assert_eq!(fields(&validate_workout(&vm, floor_2020())), ["description"]);
    }

    #[test]
    fn date_floor_is_inclusive() {
        let mut vm = leg_day_vm();
        vm.date = Some("2020-01-01".into());
        assert!(validate_workout(&vm, floor_2020()).is_empty());

        vm.date = Some("2019-12-31T23:59:59".into());
        let v = validate_workout(&vm, floor_2020());
        assert_eq!(fields(&v), ["date"]);
        assert_eq!(v[0].message, "Workout date must be on or after 2020-01-01");
    }

    #[test]
    fn date_floor_compares_offset_dates_in_utc() {
        let mut vm = leg_day_vm();
        vm.date = Some("2020-01-01T00:30:00+05:00".into());
        assert_eq!(fields(&validate_workout(&vm, floor_2020())), ["date"]);

        vm.date = Some("2020-01-01T00:30:00-05:00".into());
        assert!(validate_workout(&vm, floor_2020()).is_empty());
    }

    #[test]
    fn unparseable_and_missing_dates_are_reported() {
        let mut vm = leg_day_vm();
        vm.date = Some("yesterday".into());
        assert_eq!(fields(&validate_workout(&vm, floor_2020())), ["date"]);
        vm.date = None;
        assert_eq!(fields(&validate_workout(&vm, floor_2020())), ["date"]);
    }

    #[test]
    fn empty_and_missing_exercises_are_reported() {
        let mut vm = leg_day_vm();
        vm.exercises = Some(vec![]);
        assert_eq!(fields(&validate_workout(&vm, floor_2020())), ["exercises"]);
        vm.exercises = None;
        assert_eq!(fields(&validate_workout(&vm, floor_2020())), ["exercises"]);
    }

    #[test]
    fn every_violation_is_enumerated() {
        let mut bad_exercise = squat_vm();
        bad_exercise.name = None;
        bad_exercise.sets = -3;
        bad_exercise.duration = i64::from(u32::MAX) + 1;

        let vm = WorkoutViewModel {
            id: None,
            name: None,
            description: Some("x".repeat(501)),
            date: Some("2019-06-01".into()),
            exercises: Some(vec![squat_vm(), bad_exercise]),
        };
        let v = validate_workout(&vm, floor_2020());
        assert_eq!(
            fields(&v),
            [
                "name",
                "description",
                "date",
                "exercises[1].name",
                "exercises[1].sets",
                "exercises[1].duration",
            ]
        );
    }

    #[test]
    fn duplicate_exercise_ids_are_flagged_once_per_repeat() {
        let id = Uuid::new_v4();
        let mut a = squat_vm();
        a.id = Some(id);
        let b = a.clone();
        let c = squat_vm();
        let v = unique_exercise_ids(&[a, b, c]);
        assert_eq!(fields(&v), ["exercises[1].id"]);
    }
}
