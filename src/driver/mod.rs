//! The cooperative driver loop.
//!
//! [`StateMachine::run`] performs exactly one iteration: run the current
//! state, interpret its [`Command`](crate::core::Command), and apply at most
//! one transition. Callers loop over it, typically forever, without any
//! delay between iterations.

mod error;
mod machine;

pub use error::{MachineError, Phase};
pub use machine::{StateMachine, Step};
