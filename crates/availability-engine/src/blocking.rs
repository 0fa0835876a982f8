//! Blocking and unblocking windows of an already generated day.
//!
//! A slot is in the window when its start time lies in `[start, end)`. Only
//! those slots change; the rest of the day is written back as loaded.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{EngineError, Result};
use crate::model::{Slot, SlotStatus};
use crate::store::DayStore;
use crate::time::SlotTime;

pub struct BlockingEngine<'a, S: DayStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DayStore + ?Sized> BlockingEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Block every slot starting in `[window_start, window_end)`.
    ///
    /// Returns the number of slots in the window. Re-blocking with the same
    /// reason leaves the day unchanged; a different reason replaces the old one.
    ///
    /// # Errors
    /// `EngineError::NotFound` if the day has not been generated.
    /// `EngineError::Validation` if the window is empty or inverted.
    pub fn block_window(
        &self,
        date: NaiveDate,
        window_start: SlotTime,
        window_end: SlotTime,
        reason: &str,
    ) -> Result<usize> {
        let status = SlotStatus::Blocked {
            reason: reason.to_string(),
        };
        let count = self.apply(date, window_start, window_end, |slot| {
            slot.status = status.clone();
            true
        })?;
        info!(%date, %window_start, %window_end, reason, blocked = count, "blocked window");
        Ok(count)
    }

    /// Return every blocked slot starting in `[window_start, window_end)` to
    /// available. Returns how many slots were blocked before the call.
    pub fn unblock_window(
        &self,
        date: NaiveDate,
        window_start: SlotTime,
        window_end: SlotTime,
    ) -> Result<usize> {
        let count = self.apply(date, window_start, window_end, |slot| {
            if !slot.is_blocked() {
                return false;
            }
            slot.status = SlotStatus::Available;
            true
        })?;
        info!(%date, %window_start, %window_end, unblocked = count, "unblocked window");
        Ok(count)
    }

    fn apply(
        &self,
        date: NaiveDate,
        window_start: SlotTime,
        window_end: SlotTime,
        mut update: impl FnMut(&mut Slot) -> bool,
    ) -> Result<usize> {
        if window_end <= window_start {
            return Err(EngineError::Validation(format!(
                "window {}-{} must start before it ends",
                window_start, window_end
            )));
        }

        let mut day = self
            .store
            .find_day_by_date(date)?
            .ok_or(EngineError::NotFound(date))?;

        let mut in_window = 0;
        let mut count = 0;
        for slot in day
            .time_slots
            .iter_mut()
            .filter(|s| s.start_time >= window_start && s.start_time < window_end)
        {
            in_window += 1;
            if update(slot) {
                count += 1;
            }
        }

        if in_window == 0 {
            warn!(%date, %window_start, %window_end, "window matched no slots");
        }
        if count == 0 {
            return Ok(0);
        }

        self.store.save_day(&day)?;
        Ok(count)
    }
}
