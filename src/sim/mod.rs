//! In-memory collaborators for tests and host simulation.
//!
//! Every simulated device is a cheap handle around shared state: clone it,
//! give one copy to the machine (usually boxed inside a
//! [`Board`](crate::clock::Board)) and keep the other to press buttons,
//! advance time or inspect what was drawn. Everything is single-threaded.

use crate::clock::Board;
use crate::hal::{
    Button, Color, ElapsedTimer, HalError, HourMinute, LightSensor, Pixels, Player, Rgb, Screen,
    TimeSource,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Button with queued presses and a held level.
#[derive(Clone, Debug, Default)]
pub struct SimButton {
    presses: Rc<Cell<u32>>,
    held: Rc<Cell<bool>>,
}

impl SimButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one press edge.
    pub fn press(&self) {
        self.presses.set(self.presses.get() + 1);
    }

    /// Set the held level.
    pub fn hold(&self, held: bool) {
        self.held.set(held);
    }

    /// Press edges not yet consumed.
    pub fn pending(&self) -> u32 {
        self.presses.get()
    }
}

impl Button for SimButton {
    fn pressed(&mut self) -> bool {
        let pending = self.presses.get();
        if pending == 0 {
            return false;
        }
        self.presses.set(pending - 1);
        true
    }

    fn is_pressed(&self) -> bool {
        self.held.get()
    }
}

/// Shared millisecond counter that simulated timers read.
#[derive(Clone, Debug, Default)]
pub struct SimTicks {
    now_ms: Rc<Cell<u64>>,
}

impl SimTicks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    /// A timer reading this counter, started now.
    pub fn timer(&self) -> SimTimer {
        SimTimer {
            ticks: self.clone(),
            started: self.now_ms(),
        }
    }
}

/// Elapsed-time collaborator driven by [`SimTicks`].
#[derive(Clone, Debug)]
pub struct SimTimer {
    ticks: SimTicks,
    started: u64,
}

impl ElapsedTimer for SimTimer {
    fn start(&mut self) {
        self.started = self.ticks.now_ms();
    }

    fn elapsed_ms(&self) -> u64 {
        self.ticks.now_ms().saturating_sub(self.started)
    }
}

#[derive(Debug, Default)]
struct ClockState {
    now: HourMinute,
    alarm: HourMinute,
    failure: Option<HalError>,
}

/// Real-time clock whose time is set by hand.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    inner: Rc<RefCell<ClockState>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_now(&self, now: HourMinute) {
        self.inner.borrow_mut().now = now;
    }

    pub fn time(&self) -> HourMinute {
        self.inner.borrow().now
    }

    pub fn alarm_time(&self) -> HourMinute {
        self.inner.borrow().alarm
    }

    pub fn set_alarm_time(&self, alarm: HourMinute) {
        self.inner.borrow_mut().alarm = alarm;
    }

    /// Make every following call fail with `error`; `None` heals the clock.
    pub fn fail_with(&self, error: Option<HalError>) {
        self.inner.borrow_mut().failure = error;
    }

    fn check(&self) -> Result<(), HalError> {
        match &self.inner.borrow().failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl TimeSource for SimClock {
    fn now(&mut self) -> Result<HourMinute, HalError> {
        self.check()?;
        Ok(self.inner.borrow().now)
    }

    fn alarm(&mut self) -> Result<HourMinute, HalError> {
        self.check()?;
        Ok(self.inner.borrow().alarm)
    }

    fn set_time(&mut self, time: HourMinute) -> Result<(), HalError> {
        self.check()?;
        self.inner.borrow_mut().now = time;
        Ok(())
    }

    fn set_alarm(&mut self, alarm: HourMinute) -> Result<(), HalError> {
        self.check()?;
        self.inner.borrow_mut().alarm = alarm;
        Ok(())
    }
}

/// Light sensor returning whatever lux value was last set.
#[derive(Clone, Debug, Default)]
pub struct SimLight {
    lux: Rc<Cell<f64>>,
}

impl SimLight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, lux: f64) {
        self.lux.set(lux);
    }
}

impl LightSensor for SimLight {
    fn read_lux(&mut self) -> Result<f64, HalError> {
        Ok(self.lux.get())
    }
}

/// One buffered drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        x: i32,
        y: i32,
        scale: u32,
        text: String,
        color: Color,
    },
    Rect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    },
}

#[derive(Debug, Default)]
struct ScreenState {
    pending: Vec<DrawOp>,
    frames: Vec<Vec<DrawOp>>,
    contrast: u8,
}

/// Screen recording committed frames.
#[derive(Clone, Debug)]
pub struct SimScreen {
    width: u32,
    height: u32,
    inner: Rc<RefCell<ScreenState>>,
}

impl SimScreen {
    /// A 128x32 panel, the size the clock is laid out for.
    pub fn new() -> Self {
        Self::with_size(128, 32)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            inner: Rc::default(),
        }
    }

    /// Number of committed frames.
    pub fn frame_count(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    /// Drawing calls of the last committed frame.
    pub fn last_frame(&self) -> Vec<DrawOp> {
        self.inner.borrow().frames.last().cloned().unwrap_or_default()
    }

    /// Text drawn in the last committed frame, in drawing order.
    pub fn last_texts(&self) -> Vec<String> {
        self.last_frame()
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text),
                DrawOp::Rect { .. } => None,
            })
            .collect()
    }

    pub fn contrast(&self) -> u8 {
        self.inner.borrow().contrast
    }
}

impl Default for SimScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for SimScreen {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) -> Result<(), HalError> {
        self.inner.borrow_mut().pending.clear();
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        scale: u32,
        text: &str,
        color: Color,
    ) -> Result<(), HalError> {
        self.inner.borrow_mut().pending.push(DrawOp::Text {
            x,
            y,
            scale,
            text: text.to_string(),
            color,
        });
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), HalError> {
        self.inner.borrow_mut().pending.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), HalError> {
        self.inner.borrow_mut().contrast = level;
        Ok(())
    }

    fn update(&mut self) -> Result<(), HalError> {
        let mut state = self.inner.borrow_mut();
        let frame = state.pending.clone();
        state.frames.push(frame);
        Ok(())
    }
}

#[derive(Debug)]
struct PixelState {
    buffer: Vec<Rgb>,
    shown: Vec<Rgb>,
    brightness: u8,
    updates: usize,
}

/// LED strip remembering what was last pushed out.
#[derive(Clone, Debug)]
pub struct SimPixels {
    inner: Rc<RefCell<PixelState>>,
}

impl SimPixels {
    pub fn new(count: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PixelState {
                buffer: vec![Rgb::OFF; count],
                shown: vec![Rgb::OFF; count],
                brightness: 0,
                updates: 0,
            })),
        }
    }

    /// Color visible on LED `index` after the last update.
    pub fn shown(&self, index: usize) -> Option<Rgb> {
        self.inner.borrow().shown.get(index).copied()
    }

    pub fn brightness(&self) -> u8 {
        self.inner.borrow().brightness
    }

    pub fn update_count(&self) -> usize {
        self.inner.borrow().updates
    }
}

impl Pixels for SimPixels {
    fn len(&self) -> usize {
        self.inner.borrow().buffer.len()
    }

    fn set(&mut self, index: usize, color: Rgb) -> Result<(), HalError> {
        let mut state = self.inner.borrow_mut();
        let slot = state
            .buffer
            .get_mut(index)
            .ok_or(HalError::OutOfRange {
                what: "pixel index",
                value: index as i64,
            })?;
        *slot = color;
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), HalError> {
        self.inner.borrow_mut().brightness = level;
        Ok(())
    }

    fn update(&mut self) -> Result<(), HalError> {
        let mut state = self.inner.borrow_mut();
        state.shown = state.buffer.clone();
        state.updates += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PlayerState {
    playing: bool,
    volume: i32,
    plays: usize,
}

/// Audio player tracking play state and volume.
#[derive(Clone, Debug, Default)]
pub struct SimPlayer {
    inner: Rc<RefCell<PlayerState>>,
}

impl SimPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.inner.borrow().playing
    }

    pub fn volume(&self) -> i32 {
        self.inner.borrow().volume
    }

    /// How many times playback was started.
    pub fn play_count(&self) -> usize {
        self.inner.borrow().plays
    }
}

impl Player for SimPlayer {
    fn play(&mut self) -> Result<(), HalError> {
        let mut state = self.inner.borrow_mut();
        state.playing = true;
        state.plays += 1;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), HalError> {
        self.inner.borrow_mut().playing = false;
        Ok(())
    }

    fn adjust_volume(&mut self, delta: i8) -> Result<(), HalError> {
        self.inner.borrow_mut().volume += i32::from(delta);
        Ok(())
    }
}

/// A complete simulated clock board.
///
/// Fields are the test-side handles; [`board`](Self::board) hands out the
/// machine-side copies.
#[derive(Clone, Debug)]
pub struct SimBoard {
    pub ticks: SimTicks,
    pub rtc: SimClock,
    pub light: SimLight,
    pub left: SimScreen,
    pub right: SimScreen,
    pub pixels: SimPixels,
    pub player: SimPlayer,
    pub key_plus: SimButton,
    pub key_minus: SimButton,
    pub key_alarm: SimButton,
    pub key_enter: SimButton,
}

/// LEDs on the clock's strip.
const PIXEL_COUNT: usize = 4;

impl SimBoard {
    pub fn new() -> Self {
        Self {
            ticks: SimTicks::new(),
            rtc: SimClock::new(),
            light: SimLight::new(),
            left: SimScreen::new(),
            right: SimScreen::new(),
            pixels: SimPixels::new(PIXEL_COUNT),
            player: SimPlayer::new(),
            key_plus: SimButton::new(),
            key_minus: SimButton::new(),
            key_alarm: SimButton::new(),
            key_enter: SimButton::new(),
        }
    }

    /// Boxed collaborators sharing state with these handles.
    pub fn board(&self) -> Board {
        Board {
            rtc: Box::new(self.rtc.clone()),
            light: Box::new(self.light.clone()),
            left: Box::new(self.left.clone()),
            right: Box::new(self.right.clone()),
            pixels: Box::new(self.pixels.clone()),
            player: Box::new(self.player.clone()),
            key_plus: Box::new(self.key_plus.clone()),
            key_minus: Box::new(self.key_minus.clone()),
            key_alarm: Box::new(self.key_alarm.clone()),
            key_enter: Box::new(self.key_enter.clone()),
            timer: Box::new(self.ticks.timer()),
            blink_timer: Box::new(self.ticks.timer()),
            alarm_off_timer: Box::new(self.ticks.timer()),
        }
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_edges_are_consumed_once() {
        let handle = SimButton::new();
        let mut button = handle.clone();

        handle.press();
        assert!(button.pressed());
        assert!(!button.pressed());
        assert_eq!(handle.pending(), 0);
    }

    #[test]
    fn button_level_is_independent_of_edges() {
        let handle = SimButton::new();
        let button = handle.clone();

        handle.hold(true);
        assert!(button.is_pressed());
        handle.hold(false);
        assert!(!button.is_pressed());
    }

    #[test]
    fn timers_follow_shared_ticks() {
        let ticks = SimTicks::new();
        let mut timer = ticks.timer();

        ticks.advance(120);
        assert_eq!(timer.elapsed_ms(), 120);

        timer.start();
        ticks.advance(5);
        assert_eq!(timer.elapsed_ms(), 5);
    }

    #[test]
    fn screen_only_shows_committed_frames() {
        let handle = SimScreen::new();
        let mut screen = handle.clone();

        screen.draw_text(0, 0, 1, "12", Color::White).unwrap();
        assert_eq!(handle.frame_count(), 0);

        screen.update().unwrap();
        assert_eq!(handle.last_texts(), vec!["12".to_string()]);

        screen.clear().unwrap();
        screen.update().unwrap();
        assert!(handle.last_frame().is_empty());
    }

    #[test]
    fn pixels_reject_out_of_range_index() {
        let mut pixels = SimPixels::new(2);
        assert!(pixels.set(5, Rgb::WHITE).is_err());
    }

    #[test]
    fn pixels_show_buffer_after_update() {
        let handle = SimPixels::new(4);
        let mut pixels = handle.clone();

        pixels.set(3, Rgb::new(0, 0, 255)).unwrap();
        assert_eq!(handle.shown(3), Some(Rgb::OFF));

        pixels.update().unwrap();
        assert_eq!(handle.shown(3), Some(Rgb::new(0, 0, 255)));
        assert_eq!(handle.update_count(), 1);
    }

    #[test]
    fn clock_failure_surfaces() {
        let handle = SimClock::new();
        let mut clock = handle.clone();

        handle.fail_with(Some(HalError::Unavailable("rtc")));
        assert_eq!(clock.now(), Err(HalError::Unavailable("rtc")));

        handle.fail_with(None);
        assert!(clock.now().is_ok());
    }
}
