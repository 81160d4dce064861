//! Input collaborators.

use super::HalError;

/// A push button.
///
/// Implementations debounce at their boundary; the core only ever sees
/// clean edges.
pub trait Button {
    /// True exactly once per physical press. Reading consumes the edge.
    fn pressed(&mut self) -> bool;

    /// True while the button is held down.
    fn is_pressed(&self) -> bool;
}

/// Ambient light sensor.
pub trait LightSensor {
    /// Take a reading in lux.
    fn read_lux(&mut self) -> Result<f64, HalError>;
}
