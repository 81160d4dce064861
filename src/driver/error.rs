//! Errors raised while driving the machine.

use crate::core::{BehaviorError, StateId};
use std::fmt;
use thiserror::Error;

/// Lifecycle phase a behavior failed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Run,
    Exit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enter => "enter",
            Self::Run => "run",
            Self::Exit => "exit",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while running the machine.
///
/// None of these are meant to be recovered from inside the loop; they
/// surface at the process boundary.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Transition target {id} is not a state of this machine ({count} states)")]
    UnknownState { id: StateId, count: usize },

    #[error("The {phase} behavior of state '{state}' failed: {source}")]
    Behavior {
        state: String,
        phase: Phase,
        #[source]
        source: BehaviorError,
    },
}
