//! Wall-clock `HH:MM` values and date parsing.
//!
//! Slot boundaries are minute offsets from local midnight. Keeping them as a
//! plain offset (rather than a full datetime) makes ordering, half-open window
//! checks, and the 30-minute step trivially correct across hour boundaries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute precision, rendered as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(u16);

impl SlotTime {
    /// Build from hour and minute. Returns `None` outside `00:00..=23:59`.
    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Const constructor for literal times.
    ///
    /// # Panics
    /// Panics if `hour >= 24` or `minute >= 60`; in a const context this is a
    /// compile error.
    pub(crate) const fn at(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self(hour * 60 + minute)
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Minutes since local midnight.
    pub fn minutes_since_midnight(self) -> u16 {
        self.0
    }

    /// Add `minutes`, rolling the hour over as needed.
    ///
    /// Returns `None` when the result would reach or pass midnight; slots never
    /// span two calendar days.
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        let total = self.0.checked_add(minutes)?;
        (total < MINUTES_PER_DAY).then_some(Self(total))
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for SlotTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::Validation(format!("invalid time '{}', expected HH:MM", s));

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        SlotTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let invalid = || EngineError::Validation(format!("invalid date '{}', expected YYYY-MM-DD", s));

    let trimmed = s.trim();
    let well_formed = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())
}
