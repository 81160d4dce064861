//! Core state machine types.
//!
//! This module contains the passive building blocks of the machine:
//! - States and their behaviors via [`State`]
//! - Transition commands a run behavior hands back via [`Command`]
//! - Bounded transition history backing `Back` navigation
//!
//! Nothing in here drives anything; see [`crate::driver`] for the loop.

mod command;
mod history;
mod state;

pub use command::Command;
pub use history::{StateHistory, TransitionKind, TransitionRecord, DEFAULT_HISTORY_CAPACITY};
pub use state::{BehaviorError, BehaviorResult, State, StateId};
