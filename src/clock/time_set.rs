//! Digit-by-digit hour/minute editor.

use crate::hal::{Button, Color, Font, HalError, HourMinute, Screen};

const DIGITS: usize = 4;
const SCALE: u32 = 4;
const ORIGIN_X: i32 = 1;
const ORIGIN_Y: i32 = 4;

/// Buttons driving the editor.
pub struct EditKeys<'a> {
    pub up: &'a mut dyn Button,
    pub down: &'a mut dyn Button,
    pub enter: &'a mut dyn Button,
}

/// Result of one editor iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditStatus {
    /// False once Enter moved the cursor past the last digit.
    pub editing: bool,
    /// Whether up or down was pressed during this iteration.
    pub touched: bool,
}

/// Edits a time one digit at a time.
///
/// The cursor walks hour tens, hour ones, minute tens, minute ones. Up and
/// down shift the digit under the cursor by 10 or 1, wrapping the hour
/// within the day and the minute within the hour. Enter advances the cursor;
/// leaving the last digit ends the edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeSet {
    time: HourMinute,
    cursor: usize,
}

impl TimeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `time` with the cursor on the first digit, and draw it.
    pub fn init(
        &mut self,
        time: HourMinute,
        screen: &mut dyn Screen,
        font: &Font,
    ) -> Result<(), HalError> {
        self.time = time;
        self.cursor = 0;
        self.draw(screen, font)
    }

    /// The time as edited so far.
    pub fn time(&self) -> HourMinute {
        self.time
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Poll the keys once.
    pub fn run(
        &mut self,
        keys: EditKeys<'_>,
        screen: &mut dyn Screen,
        font: &Font,
    ) -> Result<EditStatus, HalError> {
        let mut touched = false;

        if keys.enter.pressed() {
            self.cursor += 1;
            self.draw(screen, font)?;
        }
        if keys.up.pressed() {
            touched = true;
            self.adjust(1);
            self.draw(screen, font)?;
        }
        if keys.down.pressed() {
            touched = true;
            self.adjust(-1);
            self.draw(screen, font)?;
        }

        Ok(EditStatus {
            editing: self.cursor < DIGITS,
            touched,
        })
    }

    fn adjust(&mut self, sign: i32) {
        self.time = match self.cursor {
            0 => self.time.add_hours(10 * sign),
            1 => self.time.add_hours(sign),
            2 => self.time.add_minutes(10 * sign),
            3 => self.time.add_minutes(sign),
            _ => self.time,
        };
    }

    /// Render `HH:MM` with the digit under the cursor highlighted.
    pub fn draw(&self, screen: &mut dyn Screen, font: &Font) -> Result<(), HalError> {
        let mut x = ORIGIN_X;
        let hour = self.time.hour();
        let minute = self.time.minute();

        screen.clear()?;
        self.draw_digit(screen, font, hour / 10, 0, &mut x)?;
        self.draw_digit(screen, font, hour % 10, 1, &mut x)?;

        screen.draw_text(x, ORIGIN_Y, SCALE, ":", Color::White)?;
        x += (font.width * SCALE) as i32;

        self.draw_digit(screen, font, minute / 10, 2, &mut x)?;
        self.draw_digit(screen, font, minute % 10, 3, &mut x)?;
        screen.update()
    }

    fn draw_digit(
        &self,
        screen: &mut dyn Screen,
        font: &Font,
        digit: u8,
        position: usize,
        x: &mut i32,
    ) -> Result<(), HalError> {
        let text = digit.to_string();
        let cell = font.width * SCALE;

        if position == self.cursor {
            screen.fill_rect(
                *x - 1,
                ORIGIN_Y - 1,
                cell + 2,
                font.height * SCALE,
                Color::White,
            )?;
            screen.draw_text(*x, ORIGIN_Y, SCALE, &text, Color::Black)?;
        } else {
            screen.draw_text(*x, ORIGIN_Y, SCALE, &text, Color::White)?;
        }
        *x += cell as i32 + 2;
        Ok(())
    }
}
