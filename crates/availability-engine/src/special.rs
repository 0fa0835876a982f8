//! Replacing a day's slot set with manually specified hours.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::model::{CalendarDay, CustomHours, Location, Slot, SpecialHours};
use crate::slots::expand_range;
use crate::store::DayStore;

pub struct SpecialScheduleBuilder<'a, S: DayStore + ?Sized> {
    store: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S: DayStore + ?Sized> SpecialScheduleBuilder<'a, S> {
    pub fn new(store: &'a S, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Expand the available entries of `custom_hours` into online slots.
    ///
    /// Unavailable entries contribute nothing. Entries with `end <= start`
    /// contribute nothing. A trailing partial slot is dropped.
    pub fn expand_custom_hours(&self, custom_hours: &[CustomHours]) -> Vec<Slot> {
        let mut slots: Vec<Slot> = custom_hours
            .iter()
            .filter(|h| h.is_available)
            .flat_map(|h| {
                expand_range(
                    h.start_time,
                    h.end_time,
                    &self.config.default_service_types,
                    Location::Online,
                )
            })
            .collect();

        slots.sort_by_key(|s| s.start_time);
        slots.dedup_by_key(|s| s.start_time);
        slots
    }

    /// Replace whatever is stored for `date` with a special day.
    ///
    /// This is two storage calls, a delete followed by an insert, with no
    /// transaction around them. If the insert fails the date is left with no
    /// record; calling again with the same arguments repairs it.
    pub fn set_special_day(
        &self,
        date: NaiveDate,
        reason: &str,
        custom_hours: Vec<CustomHours>,
    ) -> Result<CalendarDay> {
        let slots = self.expand_custom_hours(&custom_hours);
        // Out-of-step overlapping entries are rejected before anything is deleted.
        if let Some(pair) = slots.windows(2).find(|p| p[1].start_time < p[0].end_time) {
            return Err(EngineError::Validation(format!(
                "custom hours overlap: slot {}-{} collides with slot {}-{}",
                pair[0].start_time, pair[0].end_time, pair[1].start_time, pair[1].end_time
            )));
        }
        if slots.is_empty() && custom_hours.iter().any(|h| h.is_available) {
            warn!(%date, "custom hours produced no whole slots");
        }

        let day = CalendarDay::special(
            date,
            &self.config.timezone,
            SpecialHours {
                reason: reason.to_string(),
                custom_hours,
            },
            slots,
        );
        let replaced = self.store.delete_day_by_date(date)?;
        self.store.insert_day(&day)?;

        info!(
            %date,
            reason,
            replaced,
            slots = day.time_slots.len(),
            "special day set"
        );
        Ok(day)
    }
}
