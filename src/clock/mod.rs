//! Bedside alarm clock built on the state machine core.
//!
//! The clock is the canonical consumer of the crate: its states are plain
//! [`State`](crate::core::State)s sharing a [`ClockContext`], its idle loop
//! is a chain of [`OnChange`](crate::watch::OnChange) detectors, and its
//! settings screens are driven by a [`Menu`](crate::menu::Menu).
//!
//! Hardware is reached only through the collaborator traits in
//! [`crate::hal`], bundled in a [`Board`]. Tests and the demo use
//! [`SimBoard`](crate::sim::SimBoard).

mod board;
pub mod brightness;
mod config;
mod device;
mod error;
mod machine;
mod time_set;

pub use board::{pixel, Board};
pub use config::{ClockConfig, ConfigError};
pub use device::{Device, Watchers};
pub use error::ClockError;
pub use machine::{AlarmClock, ClockContext, ClockStates};
pub use time_set::{EditKeys, EditStatus, TimeSet};
