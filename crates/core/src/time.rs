//! Clock readings consumed by alarm checks.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::TimeField;

/// A wall-clock reading at minute resolution.
///
/// `weekday` counts from Sunday = 1 through Saturday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Moment {
    pub minute: u32,
    pub hour: u32,
    pub day: u32,
    pub month: u32,
    pub weekday: u32,
    pub year: u32,
}

impl Moment {
    /// Build a moment, rejecting components outside their field range.
    pub fn new(
        minute: u32,
        hour: u32,
        day: u32,
        month: u32,
        weekday: u32,
        year: u32,
    ) -> Result<Self, CoreError> {
        let moment = Self {
            minute,
            hour,
            day,
            month,
            weekday,
            year,
        };
        for (field, value) in [
            (TimeField::Minute, minute),
            (TimeField::Hour, hour),
            (TimeField::Day, day),
            (TimeField::Month, month),
            (TimeField::Weekday, weekday),
            (TimeField::Year, year),
        ] {
            let (min, max) = field.range();
            if value < min || value > max {
                return Err(CoreError::Time(format!(
                    "{field} {value} outside {min}..={max}"
                )));
            }
        }
        Ok(moment)
    }

    /// Convert a chrono timestamp in any zone.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            minute: dt.minute(),
            hour: dt.hour(),
            day: dt.day(),
            month: dt.month(),
            weekday: dt.weekday().number_from_sunday(),
            year: u32::try_from(dt.year()).unwrap_or(0),
        }
    }

    /// Component of this moment that `field` constrains.
    ///
    /// `Second` has no mapping at minute resolution.
    pub fn value_for(&self, field: TimeField) -> Option<u32> {
        match field {
            TimeField::Second => None,
            TimeField::Minute => Some(self.minute),
            TimeField::Hour => Some(self.hour),
            TimeField::Day => Some(self.day),
            TimeField::Month => Some(self.month),
            TimeField::Weekday => Some(self.weekday),
            TimeField::Year => Some(self.year),
        }
    }
}

impl std::fmt::Display for Moment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02} (weekday {})",
            self.year, self.month, self.day, self.hour, self.minute, self.weekday
        )
    }
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Moment;
}

/// Reads the host clock, in local time or UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    utc: bool,
}

impl SystemClock {
    pub fn local() -> Self {
        Self { utc: false }
    }

    pub fn utc() -> Self {
        Self { utc: true }
    }

    pub fn is_utc(&self) -> bool {
        self.utc
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Moment {
        if self.utc {
            Moment::from_datetime(&Utc::now())
        } else {
            Moment::from_datetime(&Local::now())
        }
    }
}

/// A clock frozen at one moment. Useful for tests and one-shot checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Moment);

impl Clock for FixedClock {
    fn now(&self) -> Moment {
        self.0
    }
}
