//! Fixtures shared by the unit tests in this crate.

use chrono::{NaiveDate, NaiveDateTime};
use workout_store::{Exercise, ExerciseId, Workout, WorkoutId};

use crate::types::{ExerciseViewModel, WorkoutViewModel};

pub fn floor_2020() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

pub fn squat_vm() -> ExerciseViewModel {
    ExerciseViewModel {
        id: None,
        name: Some("Squat".into()),
        sets: 3,
        repetitions: 10,
        weight: 80,
        duration: 0,
    }
}

pub fn leg_day_vm() -> WorkoutViewModel {
    WorkoutViewModel {
        id: None,
        name: Some("Leg Day".into()),
        description: None,
        date: Some("2024-01-01".into()),
        exercises: Some(vec![squat_vm()]),
    }
}

pub fn leg_day() -> Workout {
    Workout {
        id: WorkoutId::new(),
        name: "Leg Day".into(),
        description: None,
        date: NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date"),
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
