//! Wire representations of workouts.
//!
//! Fields are deliberately loose (`Option`, `i64`) so that a payload with a
//! missing name or a negative set count still deserializes and the validation
//! layer can report every violated rule at once.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseViewModel {
    /// Ignored on create; kept on update when present.
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sets: i64,
    #[serde(default)]
    pub repetitions: i64,
    /// Arbitrary unit.
    #[serde(default)]
    pub weight: i64,
    /// Seconds.
    #[serde(default)]
    pub duration: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutViewModel {
    /// Server-assigned on create; must equal the path id on update.
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339.
    #[serde(default, alias = "workoutDate")]
    pub date: Option<String>,
    #[serde(default)]
    pub exercises: Option<Vec<ExerciseViewModel>>,
}

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Violation {
    /// Wire path of the offending field, e.g. `exercises[0].name`.
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
