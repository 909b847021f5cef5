//! Domain entities owned by the store.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_identity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random (v4) identity.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_identity!(
    /// Identity of a workout. Assigned once at creation and never reassigned.
    WorkoutId
);

uuid_identity!(
    /// Identity of an exercise, unique within its parent workout.
    ExerciseId
);

/// A single movement specification. Owned by exactly one [`Workout`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub sets: u32,
    pub repetitions: u32,
    /// Arbitrary unit, as entered by the user.
    pub weight: u32,
    /// Seconds.
    pub duration: u32,
}

/// A named, dated collection of exercises.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutId,
    pub name: String,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    /// Take every mutable field from `other`; `self.id` is left untouched.
    pub(crate) fn replace_fields(&mut self, other: Workout) {
        let Workout {
            id: _,
            name,
            description,
            date,
            exercises,
        } = other;
        self.name = name;
        self.description = description;
        self.date = date;
        self.exercises = exercises;
    }
}
