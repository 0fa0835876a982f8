use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use super::{DayStore, StoreError, StoreResult};
use crate::model::CalendarDay;

/// In-process store keyed by date.
#[derive(Debug, Default)]
pub struct MemoryStore {
    days: Mutex<BTreeMap<NaiveDate, CalendarDay>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, BTreeMap<NaiveDate, CalendarDay>>> {
        self.days.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl DayStore for MemoryStore {
    fn find_day_by_date(&self, date: NaiveDate) -> StoreResult<Option<CalendarDay>> {
        Ok(self.lock()?.get(&date).cloned())
    }

    fn insert_day(&self, day: &CalendarDay) -> StoreResult<()> {
        let mut days = self.lock()?;
        if days.contains_key(&day.date) {
            return Err(StoreError::Duplicate(day.date));
        }
        days.insert(day.date, day.clone());
        Ok(())
    }

    fn save_day(&self, day: &CalendarDay) -> StoreResult<()> {
        let mut days = self.lock()?;
        match days.get_mut(&day.date) {
            Some(existing) => {
                *existing = day.clone();
                Ok(())
            }
            None => Err(StoreError::Missing(day.date)),
        }
    }

    fn delete_day_by_date(&self, date: NaiveDate) -> StoreResult<bool> {
        Ok(self.lock()?.remove(&date).is_some())
    }

    fn delete_many_before(&self, cutoff: NaiveDate) -> StoreResult<usize> {
        let mut days = self.lock()?;
        let kept = days.split_off(&cutoff);
        let removed = days.len();
        *days = kept;
        Ok(removed)
    }

    fn list_days(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<CalendarDay>> {
        if from > to {
            return Ok(Vec::new());
        }
        Ok(self.lock()?.range(from..=to).map(|(_, d)| d.clone()).collect())
    }
}
