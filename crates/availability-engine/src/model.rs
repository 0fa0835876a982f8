//! Calendar day and slot records.
//!
//! A stored [`CalendarDay`] is either a regular day (slots generated from the
//! weekly pattern) or a special day (slots expanded from manually supplied
//! custom hours). Closed days have no record at all; see
//! [`crate::slots::GeneratedDay`].

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::time::SlotTime;

/// Fixed duration of a bookable slot, in minutes.
pub const SLOT_MINUTES: u16 = 30;

/// Where a slot is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Online,
    #[default]
    InPerson,
    Hybrid,
}

/// Bookability of a single slot.
///
/// The block reason lives inside the `Blocked` variant, so a reason can only
/// exist on a blocked slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotStatus {
    #[default]
    Available,
    Blocked { reason: String },
}

/// A 30-minute bookable unit within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start_time: SlotTime,
    pub end_time: SlotTime,
    pub status: SlotStatus,
    pub service_types: BTreeSet<String>,
    pub location: Location,
}

impl Slot {
    pub fn available(
        start_time: SlotTime,
        end_time: SlotTime,
        service_types: BTreeSet<String>,
        location: Location,
    ) -> Self {
        Self {
            start_time,
            end_time,
            status: SlotStatus::Available,
            service_types,
            location,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.status, SlotStatus::Available)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.status, SlotStatus::Blocked { .. })
    }

    pub fn block_reason(&self) -> Option<&str> {
        match &self.status {
            SlotStatus::Blocked { reason } => Some(reason),
            SlotStatus::Available => None,
        }
    }
}

/// One entry of a special day's manual hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHours {
    pub start_time: SlotTime,
    pub end_time: SlotTime,
    pub is_available: bool,
}

impl CustomHours {
    pub fn available(start_time: SlotTime, end_time: SlotTime) -> Self {
        Self {
            start_time,
            end_time,
            is_available: true,
        }
    }

    pub fn unavailable(start_time: SlotTime, end_time: SlotTime) -> Self {
        Self {
            start_time,
            end_time,
            is_available: false,
        }
    }
}

/// Parses `"HH:MM-HH:MM"` into an available range.
impl FromStr for CustomHours {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s.split_once('-').ok_or_else(|| {
            EngineError::Validation(format!("invalid hours '{}', expected HH:MM-HH:MM", s))
        })?;
        Ok(Self::available(start.parse()?, end.parse()?))
    }
}

/// Override record kept verbatim on a special day for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialHours {
    pub reason: String,
    pub custom_hours: Vec<CustomHours>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayKind {
    Regular,
    Special(SpecialHours),
}

/// The stored slot set for one calendar date. At most one exists per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub timezone: String,
    pub kind: DayKind,
    pub time_slots: Vec<Slot>,
}

impl CalendarDay {
    pub fn regular(date: NaiveDate, timezone: impl Into<String>, time_slots: Vec<Slot>) -> Self {
        Self {
            date,
            timezone: timezone.into(),
            kind: DayKind::Regular,
            time_slots,
        }
    }

    pub fn special(
        date: NaiveDate,
        timezone: impl Into<String>,
        special: SpecialHours,
        time_slots: Vec<Slot>,
    ) -> Self {
        Self {
            date,
            timezone: timezone.into(),
            kind: DayKind::Special(special),
            time_slots,
        }
    }

    /// 0 = Sunday .. 6 = Saturday.
    pub fn day_of_week(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }

    pub fn is_special_day(&self) -> bool {
        matches!(self.kind, DayKind::Special(_))
    }

    pub fn special_hours(&self) -> Option<&SpecialHours> {
        match &self.kind {
            DayKind::Special(special) => Some(special),
            DayKind::Regular => None,
        }
    }

    pub fn slot_at(&self, start: SlotTime) -> Option<&Slot> {
        self.time_slots.iter().find(|s| s.start_time == start)
    }

    /// Check the slot-ordering invariants: fixed 30-minute length, strictly
    /// increasing start times, no overlap.
    pub fn validate_slots(&self) -> Result<()> {
        let mut previous_end: Option<SlotTime> = None;
        for slot in &self.time_slots {
            if slot.start_time.checked_add_minutes(SLOT_MINUTES) != Some(slot.end_time) {
                return Err(EngineError::Logic(format!(
                    "{}: slot {}-{} is not {} minutes long",
                    self.date, slot.start_time, slot.end_time, SLOT_MINUTES
                )));
            }
            if let Some(end) = previous_end {
                if slot.start_time < end {
                    return Err(EngineError::Logic(format!(
                        "{}: slot starting {} overlaps the previous slot ending {}",
                        self.date, slot.start_time, end
                    )));
                }
            }
            previous_end = Some(slot.end_time);
        }
        Ok(())
    }
}
