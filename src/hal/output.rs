//! Output collaborators: addressable LEDs and the audio player.

use super::HalError;
use serde::{Deserialize, Serialize};

/// 8-bit RGB color of one LED.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A strip of addressable LEDs.
///
/// Like screens, writes are buffered until [`update`](Pixels::update).
pub trait Pixels {
    /// Number of LEDs on the strip.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&mut self, index: usize, color: Rgb) -> Result<(), HalError>;

    /// Global brightness applied on top of every color.
    fn set_brightness(&mut self, level: u8) -> Result<(), HalError>;

    /// Push buffered colors to the strip.
    fn update(&mut self) -> Result<(), HalError>;
}

/// Audio player used for the alarm sound.
pub trait Player {
    fn play(&mut self) -> Result<(), HalError>;

    fn pause(&mut self) -> Result<(), HalError>;

    /// Change the volume by `delta` steps.
    fn adjust_volume(&mut self, delta: i8) -> Result<(), HalError>;
}
