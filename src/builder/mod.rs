//! Builder API for assembling state machines.
//!
//! States are allocated in an arena owned by the builder, which hands out
//! [`StateId`](crate::core::StateId)s up front so behaviors can refer to
//! each other before the machine exists.

pub mod error;
pub mod machine;

pub use error::{BuildError, BuildViolation};
pub use machine::StateMachineBuilder;
