//! Default slot generation from the weekly pattern.
//!
//! Pure and deterministic: the same `(date, config)` always yields the same
//! slot set. Nothing here touches storage.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::config::EngineConfig;
use crate::model::{Location, Slot, SLOT_MINUTES};
use crate::time::SlotTime;

/// Result of applying the weekly pattern to a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedDay {
    /// The date is open; these are its slots in start-time order.
    Open(Vec<Slot>),
    /// The date falls on a closed weekday. No record may be persisted.
    Closed,
}

/// Expand `[start, end)` into contiguous 30-minute slots.
///
/// Only whole slots are emitted: a trailing remainder shorter than a slot is
/// dropped. `end <= start` yields no slots.
pub fn expand_range(
    start: SlotTime,
    end: SlotTime,
    service_types: &BTreeSet<String>,
    location: Location,
) -> Vec<Slot> {
    let mut slots = Vec::new();
    let mut cursor = start;

    while let Some(next) = cursor.checked_add_minutes(SLOT_MINUTES) {
        if next > end {
            break;
        }
        slots.push(Slot::available(cursor, next, service_types.clone(), location));
        cursor = next;
    }

    slots
}

#[derive(Debug, Clone)]
pub struct SlotGenerator {
    config: EngineConfig,
}

impl SlotGenerator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply the weekly pattern to `date`.
    pub fn generate_default_slots(&self, date: NaiveDate) -> GeneratedDay {
        if self.config.is_closed(date.weekday()) {
            return GeneratedDay::Closed;
        }

        let slots = self
            .config
            .business_hours
            .iter()
            .flat_map(|window| {
                expand_range(
                    window.start,
                    window.end,
                    &self.config.default_service_types,
                    self.config.default_location,
                )
            })
            .collect();

        GeneratedDay::Open(slots)
    }
}
