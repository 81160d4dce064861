//! The devices the clock is wired to.

use crate::hal::{Button, ElapsedTimer, LightSensor, Pixels, Player, Screen, TimeSource};

/// LED slots on the strip.
pub mod pixel {
    pub const RIGHT: usize = 0;
    pub const MIDDLE: usize = 1;
    pub const LEFT: usize = 2;
    /// Alarm indicator facing the sleeper.
    pub const FRONT: usize = 3;

    /// The backlight LEDs behind the two screens.
    pub const BACKLIGHT: [usize; 3] = [LEFT, MIDDLE, RIGHT];
}

/// Every collaborator the clock talks to.
///
/// The left screen shows hours and the menu; the right screen shows
/// minutes and the time editor.
pub struct Board {
    pub rtc: Box<dyn TimeSource>,
    pub light: Box<dyn LightSensor>,
    pub left: Box<dyn Screen>,
    pub right: Box<dyn Screen>,
    pub pixels: Box<dyn Pixels>,
    pub player: Box<dyn Player>,
    pub key_plus: Box<dyn Button>,
    pub key_minus: Box<dyn Button>,
    pub key_alarm: Box<dyn Button>,
    pub key_enter: Box<dyn Button>,
    /// Inactivity timer shared by the menu, editors and volume screen.
    pub timer: Box<dyn ElapsedTimer>,
    pub blink_timer: Box<dyn ElapsedTimer>,
    pub alarm_off_timer: Box<dyn ElapsedTimer>,
}
