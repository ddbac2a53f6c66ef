//! Time Engine - time-of-day values and wall clock seeding
//!
//! Provides the settable time of day shown by the dial, end-time arithmetic
//! for durations, and the current wall time used to seed a new clock.

use chrono::{Local, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: i32 = 24 * 60;

/// AM/PM indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    AM,
    PM,
}

impl Meridiem {
    /// Meridiem of an hour in 24-hour format
    pub fn of_hour(hour24: u32) -> Self {
        if hour24 <= 11 {
            Meridiem::AM
        } else {
            Meridiem::PM
        }
    }
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::AM => write!(f, "AM"),
            Meridiem::PM => write!(f, "PM"),
        }
    }
}

/// A time of day with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Hour in 24-hour format (0-23)
    pub hour: u32,
    /// Minute (0-59)
    pub minute: u32,
}

impl TimeOfDay {
    /// Build a time of day from any hour/minute pair.
    ///
    /// Out-of-range values carry into the neighbouring unit and wrap around
    /// the day, so `(25, 0)` is 01:00 and `(0, -10)` is 23:50.
    pub fn new(hour: i32, minute: i32) -> Self {
        let hours = hour.rem_euclid(24) * 60;
        let total = (hours + minute.rem_euclid(MINUTES_PER_DAY)).rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (total / 60) as u32,
            minute: (total % 60) as u32,
        }
    }

    /// Hour in 12-hour format (1-12)
    pub fn hour12(&self) -> u32 {
        match self.hour {
            0 => 12,
            1..=12 => self.hour,
            _ => self.hour - 12,
        }
    }

    pub fn meridiem(&self) -> Meridiem {
        Meridiem::of_hour(self.hour)
    }

    /// Time of day `minutes` later, wrapping past midnight
    pub fn plus_minutes(&self, minutes: u32) -> Self {
        let minutes = (minutes % MINUTES_PER_DAY as u32) as i32;
        Self::new(self.hour as i32, self.minute as i32 + minutes)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Format a start time and duration as "HH:MM - HH:MM"
pub fn format_span(start: TimeOfDay, duration: u32) -> String {
    format!("{} - {}", start, start.plus_minutes(duration))
}

/// Current wall time of day, in `tz` or the system's local zone
pub fn now(tz: Option<Tz>) -> TimeOfDay {
    let (hour, minute) = match tz {
        Some(tz) => {
            let local = Utc::now().with_timezone(&tz);
            (local.hour(), local.minute())
        }
        None => {
            let local = Local::now();
            (local.hour(), local.minute())
        }
    };
    TimeOfDay::new(hour as i32, minute as i32)
}

/// Parse a timezone string into a Tz
pub fn parse_timezone(tz_str: &str) -> Result<Tz, String> {
    tz_str
        .parse::<Tz>()
        .map_err(|_| format!("Invalid timezone: {}", tz_str))
}
