//! Collaborator interfaces.
//!
//! The core never talks to hardware directly. Everything it needs from the
//! outside world (time of day, buttons, elapsed time, screens, light level,
//! LEDs, audio) is expressed as a small trait here. Host implementations
//! for the clock and timer live alongside; simulated ones live in
//! [`crate::sim`].

mod input;
mod output;
mod screen;
mod time;
mod timer;

pub use input::{Button, LightSensor};
pub use output::{Pixels, Player, Rgb};
pub use screen::{Color, Font, Screen, FONT_8X5};
pub use time::{HourMinute, SystemClock, TimeSource};
pub use timer::{ElapsedTimer, MonotonicTimer};

use thiserror::Error;

/// Errors reported by collaborators.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HalError {
    #[error("Bus transfer to {device} failed: {reason}")]
    Bus { device: &'static str, reason: String },

    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: i64 },

    #[error("Device {0} is not available")]
    Unavailable(&'static str),
}
