//! Shared store double for failure-path tests.

#![allow(dead_code)]

use availability_engine::store::{DayStore, MemoryStore, StoreError, StoreResult};
use availability_engine::CalendarDay;
use chrono::NaiveDate;
use std::cell::Cell;

/// Delegates to a `MemoryStore` but fails selected writes with
/// `StoreError::Poisoned`.
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    /// 1-based index of the insert that fails; later inserts succeed.
    pub fail_on_insert: Option<usize>,
    pub fail_saves: bool,
    inserts: Cell<usize>,
}

impl FailingStore {
    pub fn failing_insert(n: usize) -> Self {
        Self {
            fail_on_insert: Some(n),
            ..Self::default()
        }
    }

    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }
}

impl DayStore for FailingStore {
    fn find_day_by_date(&self, date: NaiveDate) -> StoreResult<Option<CalendarDay>> {
        self.inner.find_day_by_date(date)
    }

    fn insert_day(&self, day: &CalendarDay) -> StoreResult<()> {
        let n = self.inserts.get() + 1;
        self.inserts.set(n);
        if self.fail_on_insert == Some(n) {
            return Err(StoreError::Poisoned);
        }
        self.inner.insert_day(day)
    }

    fn save_day(&self, day: &CalendarDay) -> StoreResult<()> {
        if self.fail_saves {
            return Err(StoreError::Poisoned);
        }
        self.inner.save_day(day)
    }

    fn delete_day_by_date(&self, date: NaiveDate) -> StoreResult<bool> {
        self.inner.delete_day_by_date(date)
    }

    fn delete_many_before(&self, cutoff: NaiveDate) -> StoreResult<usize> {
        self.inner.delete_many_before(cutoff)
    }

    fn list_days(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<CalendarDay>> {
        self.inner.list_days(from, to)
    }
}
