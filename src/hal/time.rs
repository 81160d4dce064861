//! Time of day and the time-source collaborator.

use super::HalError;
use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hour and minute of the day.
///
/// Equality is component-wise, so two snapshots taken from a clock compare
/// equal exactly when they show the same minute.
///
/// # Example
///
/// ```rust
/// use tickstate::hal::HourMinute;
///
/// let wake = HourMinute::new(6, 45).unwrap();
/// assert_eq!(wake.to_string(), "06:45");
/// assert_eq!(wake.add_minutes(20), HourMinute::new(6, 5).unwrap());
/// assert!(HourMinute::new(24, 0).is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct HourMinute {
    hour: u8,
    minute: u8,
}

impl HourMinute {
    pub const MIDNIGHT: HourMinute = HourMinute { hour: 0, minute: 0 };

    /// Validated constructor: hours 0-23, minutes 0-59.
    pub fn new(hour: u8, minute: u8) -> Result<Self, HalError> {
        if hour > 23 {
            return Err(HalError::OutOfRange {
                what: "hour",
                value: i64::from(hour),
            });
        }
        if minute > 59 {
            return Err(HalError::OutOfRange {
                what: "minute",
                value: i64::from(minute),
            });
        }
        Ok(Self { hour, minute })
    }

    /// Snapshot the hour and minute of any chrono time value.
    pub fn from_timelike<T: Timelike>(time: &T) -> Self {
        // chrono guarantees hour < 24 and minute < 60
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Shift the hour by `delta`, wrapping around the day. Minutes stay put.
    pub fn add_hours(self, delta: i32) -> Self {
        Self {
            hour: (i32::from(self.hour) + delta).rem_euclid(24) as u8,
            ..self
        }
    }

    /// Shift the minute by `delta`, wrapping within the hour. The hour stays put.
    pub fn add_minutes(self, delta: i32) -> Self {
        Self {
            minute: (i32::from(self.minute) + delta).rem_euclid(60) as u8,
            ..self
        }
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for HourMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Real-time clock with an alarm register.
pub trait TimeSource {
    /// Current time of day.
    fn now(&mut self) -> Result<HourMinute, HalError>;

    /// Configured alarm time.
    fn alarm(&mut self) -> Result<HourMinute, HalError>;

    fn set_time(&mut self, time: HourMinute) -> Result<(), HalError>;

    fn set_alarm(&mut self, alarm: HourMinute) -> Result<(), HalError>;
}

/// Host time source reading the local wall clock.
///
/// Setting the time stores an offset from the wall clock rather than
/// touching the system clock. The alarm is kept in memory.
#[derive(Clone, Debug, Default)]
pub struct SystemClock {
    offset_minutes: i64,
    alarm: HourMinute,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn wall(&self) -> HourMinute {
        HourMinute::from_timelike(&Local::now())
    }
}

impl TimeSource for SystemClock {
    fn now(&mut self) -> Result<HourMinute, HalError> {
        let shifted = Local::now() + chrono::Duration::minutes(self.offset_minutes);
        Ok(HourMinute::from_timelike(&shifted))
    }

    fn alarm(&mut self) -> Result<HourMinute, HalError> {
        Ok(self.alarm)
    }

    fn set_time(&mut self, time: HourMinute) -> Result<(), HalError> {
        let wall = self.wall();
        self.offset_minutes =
            i64::from(time.minutes_since_midnight()) - i64::from(wall.minutes_since_midnight());
        Ok(())
    }

    fn set_alarm(&mut self, alarm: HourMinute) -> Result<(), HalError> {
        self.alarm = alarm;
        Ok(())
    }
}
