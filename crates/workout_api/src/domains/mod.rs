//! Workout payload rules and mapping.
//!
//! - [`validation`]: pure field predicates, run before any store call
//! - [`workouts`]: view model to entity conversion and the identity policy

pub mod validation;
pub mod workouts;
