//! Ambient light to brightness mapping and the alarm pulse curve.

/// Brightness applied to the screens and LEDs for one light level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Level {
    /// Upper bound of the clamped lux reading this level covers.
    pub intensity: u32,
    /// Screen contrast.
    pub contrast: u8,
    /// LED strip brightness.
    pub pixel: u8,
}

const fn level(intensity: u32, contrast: u8, pixel: u8) -> Level {
    Level {
        intensity,
        contrast,
        pixel,
    }
}

/// Light levels, ascending by intensity.
pub const LEVELS: [Level; 16] = [
    level(0, 0, 5),
    level(2, 2, 5),
    level(3, 3, 5),
    level(4, 4, 5),
    level(6, 6, 5),
    level(8, 8, 5),
    level(11, 11, 6),
    level(16, 16, 7),
    level(23, 23, 8),
    level(32, 32, 9),
    level(45, 45, 10),
    level(64, 64, 11),
    level(90, 90, 12),
    level(128, 128, 13),
    level(181, 181, 14),
    level(255, 255, 15),
];

/// Red channel of the alarm pulse: ramp up, hold, ramp down.
pub const PULSE: [u8; 40] = [
    0, 2, 3, 4, 6, 8, 11, 16, 23, 32, 45, 64, 90, 128, 181, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 181, 128, 90, 64, 45, 32, 23, 16, 11, 8, 6, 4, 3, 2,
];

/// Index into [`LEVELS`] for a lux reading.
///
/// Readings are clamped to `0..=255` and truncated, then the first level
/// whose intensity is at least the reading wins.
pub fn level_for_lux(lux: f64) -> usize {
    let value = if lux.is_nan() {
        0
    } else {
        lux.clamp(0.0, 255.0) as u32
    };

    LEVELS
        .iter()
        .position(|level| value <= level.intensity)
        .unwrap_or(LEVELS.len() - 1)
}
