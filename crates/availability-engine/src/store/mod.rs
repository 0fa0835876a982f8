//! Persistence of calendar days.
//!
//! Dates are normalized calendar dates, so the half-open day interval
//! `[midnight, midnight + 1 day)` reduces to equality on [`NaiveDate`].
//! Stores do no caching of their own; callers re-read before every mutation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::CalendarDay;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a calendar day already exists for {0}")]
    Duplicate(NaiveDate),

    #[error("no calendar day exists for {0}")]
    Missing(NaiveDate),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub trait DayStore {
    /// The record for `date`, if any.
    fn find_day_by_date(&self, date: NaiveDate) -> StoreResult<Option<CalendarDay>>;

    /// Create a record. Fails with [`StoreError::Duplicate`] if one exists.
    fn insert_day(&self, day: &CalendarDay) -> StoreResult<()>;

    /// Overwrite an existing record. Fails with [`StoreError::Missing`] if none exists.
    fn save_day(&self, day: &CalendarDay) -> StoreResult<()>;

    /// Remove the record for `date`. Returns whether one existed.
    fn delete_day_by_date(&self, date: NaiveDate) -> StoreResult<bool>;

    /// Remove every record dated strictly before `cutoff`.
    fn delete_many_before(&self, cutoff: NaiveDate) -> StoreResult<usize>;

    /// Records with `from <= date <= to`, in date order.
    fn list_days(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<CalendarDay>>;
}

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
