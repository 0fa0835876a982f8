//! Idempotent generation of calendar days over a date range.
//!
//! Each day is looked up, generated, and committed on its own. A failure part
//! way through leaves earlier days committed; re-running the same range picks
//! up where it stopped because existing days are always skipped.

use chrono::{Months, NaiveDate};
use tracing::{debug, info};

use crate::clock::{today_in, Clock};
use crate::error::{EngineError, Result};
use crate::model::CalendarDay;
use crate::slots::{GeneratedDay, SlotGenerator};
use crate::store::DayStore;

/// What happened to a single date during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    Generated,
    /// A record already existed and was left untouched.
    AlreadyExists,
    /// Closed weekday; no record was created.
    Closed,
}

/// Counters returned by a range run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationSummary {
    pub generated: usize,
    pub skipped: usize,
}

pub struct AvailabilityEngine<'a, S: DayStore + ?Sized> {
    store: &'a S,
    generator: &'a SlotGenerator,
}

impl<'a, S: DayStore + ?Sized> AvailabilityEngine<'a, S> {
    pub fn new(store: &'a S, generator: &'a SlotGenerator) -> Self {
        Self { store, generator }
    }

    /// Generate `date` from the weekly pattern unless it already exists or is closed.
    pub fn generate_for_date(&self, date: NaiveDate) -> Result<DayOutcome> {
        if self.store.find_day_by_date(date)?.is_some() {
            debug!(%date, "day already exists, skipping");
            return Ok(DayOutcome::AlreadyExists);
        }

        match self.generator.generate_default_slots(date) {
            GeneratedDay::Closed => {
                debug!(%date, "closed weekday, skipping");
                Ok(DayOutcome::Closed)
            }
            GeneratedDay::Open(slots) => {
                let day = CalendarDay::regular(date, &self.generator.config().timezone, slots);
                self.store.insert_day(&day)?;
                debug!(%date, slots = day.time_slots.len(), "generated day");
                Ok(DayOutcome::Generated)
            }
        }
    }

    /// Generate every date in `start..=end`.
    ///
    /// # Errors
    /// Returns `EngineError::Logic` if `end` precedes `start`. Storage failures
    /// abort the run immediately; days committed before the failure remain.
    pub fn generate_range(&self, start: NaiveDate, end: NaiveDate) -> Result<GenerationSummary> {
        if end < start {
            return Err(EngineError::Logic(format!(
                "date range ends ({}) before it starts ({})",
                end, start
            )));
        }

        let mut summary = GenerationSummary::default();
        for date in start.iter_days().take_while(|d| *d <= end) {
            match self.generate_for_date(date)? {
                DayOutcome::Generated => summary.generated += 1,
                DayOutcome::AlreadyExists | DayOutcome::Closed => summary.skipped += 1,
            }
        }

        info!(
            %start,
            %end,
            generated = summary.generated,
            skipped = summary.skipped,
            "availability generation complete"
        );
        Ok(summary)
    }

    /// Generate from today through today plus the configured horizon.
    pub fn generate_horizon(&self, clock: &dyn Clock) -> Result<GenerationSummary> {
        let today = today_in(clock, self.generator.config().tz()?);
        self.generate_range(today, self.horizon_end(today)?)
    }

    /// The last date of a run starting at `start`: `start` plus the configured horizon.
    pub fn horizon_end(&self, start: NaiveDate) -> Result<NaiveDate> {
        let months = self.generator.config().horizon_months;
        start
            .checked_add_months(Months::new(months))
            .ok_or_else(|| {
                EngineError::Logic(format!("{} months after {} is out of range", months, start))
            })
    }
}
