//! Build errors for the state machine builder.

use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(id) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("Invalid state machine: {}", describe(.0))]
    Invalid(Vec<BuildViolation>),
}

/// A single problem found while validating a builder.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildViolation {
    #[error("initial state {id} is not registered ({count} states)")]
    UnknownInitialState { id: StateId, count: usize },

    #[error("state {id} has an empty name")]
    EmptyName { id: StateId },

    #[error("state name '{name}' is used more than once")]
    DuplicateName { name: String },
}

fn describe(violations: &[BuildViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
