//! Deleting days older than the retention horizon.

use chrono::{Days, NaiveDate};
use tracing::info;

use crate::clock::{today_in, Clock};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::store::DayStore;

pub struct RetentionSweeper<'a, S: DayStore + ?Sized> {
    store: &'a S,
    config: &'a EngineConfig,
    clock: &'a dyn Clock,
}

impl<'a, S: DayStore + ?Sized> RetentionSweeper<'a, S> {
    pub fn new(store: &'a S, config: &'a EngineConfig, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// The first date that survives a sweep with `retention_days`.
    pub fn cutoff(&self, retention_days: u32) -> Result<NaiveDate> {
        let today = today_in(self.clock, self.config.tz()?);
        today
            .checked_sub_days(Days::new(u64::from(retention_days)))
            .ok_or_else(|| {
                EngineError::Logic(format!(
                    "{} days before {} is out of range",
                    retention_days, today
                ))
            })
    }

    /// Delete every day dated strictly before `today - retention_days`.
    pub fn purge_older_than(&self, retention_days: u32) -> Result<usize> {
        let cutoff = self.cutoff(retention_days)?;
        let removed = self.store.delete_many_before(cutoff)?;
        info!(%cutoff, removed, "retention sweep complete");
        Ok(removed)
    }

    /// Sweep with the configured retention.
    pub fn purge(&self) -> Result<usize> {
        self.purge_older_than(self.config.retention_days)
    }
}
