//! Shared clock state and the detectors polling it.

use super::board::{pixel, Board};
use super::brightness::{level_for_lux, LEVELS, PULSE};
use super::config::ClockConfig;
use super::time_set::{EditKeys, EditStatus, TimeSet};
use crate::core::BehaviorResult;
use crate::hal::{Color, Font, HalError, HourMinute, Rgb, Screen, FONT_8X5};
use crate::menu::Menu;
use crate::watch::OnChange;
use tracing::{debug, info};

const DIGIT_SCALE: u32 = 8;
const LEFT_X: i32 = 40;
const RIGHT_X: i32 = 1;
const TOP_Y: i32 = 1;

/// Everything the clock's behaviors read and write.
pub struct Device {
    pub(crate) board: Board,
    pub(crate) config: ClockConfig,
    pub(crate) font: Font,
    pub(crate) now: HourMinute,
    pub(crate) lux: f64,
    pub(crate) alarm_on: bool,
    pub(crate) alarm_playing: bool,
    pub(crate) last_is_alarm: bool,
    pub(crate) brightness_index: usize,
    pub(crate) pulse_index: usize,
    pub(crate) menu: Menu,
    pub(crate) time_set: TimeSet,
}

impl Device {
    pub(crate) fn new(board: Board, config: ClockConfig, menu: Menu) -> Self {
        Self {
            board,
            config,
            font: FONT_8X5,
            now: HourMinute::MIDNIGHT,
            lux: 0.0,
            alarm_on: false,
            alarm_playing: false,
            last_is_alarm: false,
            brightness_index: 0,
            pulse_index: 0,
            menu,
            time_set: TimeSet::new(),
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Time of day as of the last refresh.
    pub fn now(&self) -> HourMinute {
        self.now
    }

    /// Light level as of the last refresh.
    pub fn lux(&self) -> f64 {
        self.lux
    }

    pub fn alarm_on(&self) -> bool {
        self.alarm_on
    }

    pub fn alarm_playing(&self) -> bool {
        self.alarm_playing
    }

    /// Index into [`LEVELS`] chosen for the current light level.
    pub fn brightness_index(&self) -> usize {
        self.brightness_index
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn time_set(&self) -> &TimeSet {
        &self.time_set
    }

    /// Draw `left` on the left screen and `right` on the right one, large.
    pub(crate) fn show_pair(&mut self, left: &str, right: &str) -> Result<(), HalError> {
        draw_big(self.board.left.as_mut(), LEFT_X, left)?;
        draw_big(self.board.right.as_mut(), RIGHT_X, right)
    }

    pub(crate) fn show_time(&mut self, time: HourMinute) -> Result<(), HalError> {
        let hours = format!("{:02}", time.hour());
        let minutes = format!("{:02}", time.minute());
        self.show_pair(&hours, &minutes)
    }

    pub(crate) fn draw_menu(&mut self) -> Result<(), HalError> {
        self.menu.draw(self.board.left.as_mut(), &self.font)
    }

    pub(crate) fn run_editor(&mut self) -> Result<EditStatus, HalError> {
        let board = &mut self.board;
        let keys = EditKeys {
            up: board.key_plus.as_mut(),
            down: board.key_minus.as_mut(),
            enter: board.key_enter.as_mut(),
        };
        self.time_set.run(keys, board.right.as_mut(), &self.font)
    }

    pub(crate) fn set_backlight(&mut self, color: Rgb) -> Result<(), HalError> {
        for index in pixel::BACKLIGHT {
            self.board.pixels.set(index, color)?;
        }
        self.board.pixels.update()
    }

    pub(crate) fn clear_pixels(&mut self) -> Result<(), HalError> {
        for index in 0..self.board.pixels.len() {
            self.board.pixels.set(index, Rgb::OFF)?;
        }
        self.board.pixels.update()
    }

    /// Whether the inactivity timer ran past the menu timeout.
    pub(crate) fn timed_out(&self) -> bool {
        self.board.timer.elapsed_ms() > self.config.menu_timeout_ms
    }

    pub(crate) fn start_alarm(&mut self) -> Result<(), HalError> {
        self.alarm_playing = true;
        self.pulse_index = 0;
        self.board.blink_timer.start();
        self.board.alarm_off_timer.start();
        self.board.player.play()?;
        info!(time = %self.now, "alarm started");
        Ok(())
    }

    /// Silence the alarm and disarm it.
    pub(crate) fn stop_alarm(&mut self) -> Result<(), HalError> {
        self.board.player.pause()?;
        self.alarm_playing = false;
        self.alarm_on = false;
        info!("alarm stopped");
        Ok(())
    }

    /// Advance the alarm LED pulse by one step.
    pub(crate) fn pulse(&mut self) -> Result<(), HalError> {
        let red = PULSE[self.pulse_index];
        self.board.pixels.set(pixel::FRONT, Rgb::new(red, 0, 0))?;
        self.board.pixels.update()?;

        self.pulse_index = (self.pulse_index + 1) % PULSE.len();
        self.board.blink_timer.start();
        Ok(())
    }

    fn on_time_change(_: &HourMinute, time: &HourMinute, device: &mut Device) -> BehaviorResult {
        device.show_time(*time)?;

        let is_alarm = device.board.rtc.alarm()? == *time;
        if is_alarm && !device.last_is_alarm && device.alarm_on {
            device.start_alarm()?;
        }
        device.last_is_alarm = is_alarm;
        Ok(())
    }

    fn on_alarm_change(_: &bool, on: &bool, device: &mut Device) -> BehaviorResult {
        let blue = if *on { 255 } else { 0 };
        device.board.pixels.set(pixel::FRONT, Rgb::new(0, 0, blue))?;
        device.board.pixels.update()?;
        Ok(())
    }

    fn on_light_change(_: &f64, lux: &f64, device: &mut Device) -> BehaviorResult {
        device.brightness_index = level_for_lux(*lux);
        Ok(())
    }

    fn on_brightness_change(_: &usize, index: &usize, device: &mut Device) -> BehaviorResult {
        let level = LEVELS[(*index).min(LEVELS.len() - 1)];

        // the pulse owns the strip while the alarm plays
        if !device.alarm_playing {
            device.board.pixels.set_brightness(level.pixel)?;
            device.board.pixels.update()?;
        }
        device.board.left.set_contrast(level.contrast)?;
        device.board.right.set_contrast(level.contrast)?;
        debug!(index, contrast = level.contrast, "brightness applied");
        Ok(())
    }
}

fn draw_big(screen: &mut dyn Screen, x: i32, text: &str) -> Result<(), HalError> {
    screen.clear()?;
    screen.draw_text(x, TOP_Y, DIGIT_SCALE, text, Color::White)?;
    screen.update()
}

/// Change detectors of the idle loop.
pub struct Watchers {
    pub(crate) time: OnChange<HourMinute, Device>,
    pub(crate) alarm: OnChange<bool, Device>,
    pub(crate) light: OnChange<f64, Device>,
    pub(crate) brightness: OnChange<usize, Device>,
}

impl Watchers {
    pub(crate) fn new(device: &Device) -> Self {
        let time = OnChange::new(device, |d: &Device| d.now, Device::on_time_change)
            .with_refresh(|d: &mut Device| {
                d.now = d.board.rtc.now()?;
                Ok(())
            });
        let alarm = OnChange::new(device, |d: &Device| d.alarm_on, Device::on_alarm_change);
        let light = OnChange::new(device, |d: &Device| d.lux, Device::on_light_change)
            .with_refresh(|d: &mut Device| {
                d.lux = d.board.light.read_lux()?;
                Ok(())
            });
        let brightness = OnChange::new(
            device,
            |d: &Device| d.brightness_index,
            Device::on_brightness_change,
        );

        Self {
            time,
            alarm,
            light,
            brightness,
        }
    }

    /// Evaluate every detector once.
    ///
    /// Brightness runs after light so it sees the level the light callback
    /// picked in the same pass.
    pub(crate) fn evaluate(&mut self, device: &mut Device) -> BehaviorResult {
        self.time.evaluate(device)?;
        self.alarm.evaluate(device)?;
        self.light.evaluate(device)?;
        self.brightness.evaluate(device)?;
        Ok(())
    }
}

impl std::fmt::Debug for Watchers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watchers")
            .field("time", &self.time)
            .field("alarm", &self.alarm)
            .field("light", &self.light)
            .field("brightness", &self.brightness)
            .finish()
    }
}
