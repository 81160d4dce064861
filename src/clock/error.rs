//! Clock errors.

use super::config::ConfigError;
use crate::builder::BuildError;
use crate::core::StateId;
use crate::driver::MachineError;
use crate::hal::HalError;
use thiserror::Error;

/// Errors raised while assembling or driving the clock.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to assemble the clock state machine: {0}")]
    Build(#[from] BuildError),

    #[error("State {0} was never registered")]
    MissingState(StateId),

    #[error(transparent)]
    Machine(#[from] MachineError),

    #[error(transparent)]
    Hal(#[from] HalError),
}
