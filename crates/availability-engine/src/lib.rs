//! # availability-engine
//!
//! Generates, overrides, blocks, and retires bookable 30-minute slots for a
//! service calendar.
//!
//! Every operation runs synchronously against a [`DayStore`] and commits one
//! day at a time. There is no cross-day transaction and no optimistic
//! concurrency token: concurrent writers to the same date race at the store
//! and the last write wins. Serialize per-date writes outside the engine if
//! that matters.
//!
//! ## Modules
//!
//! - [`slots`] — weekly pattern → default slot set (or closed)
//! - [`engine`] — idempotent generation over a date range
//! - [`blocking`] — block or unblock a window of an existing day
//! - [`special`] — replace a day with manually specified hours
//! - [`retention`] — delete days older than the retention horizon
//! - [`store`] — persistence trait with in-memory and SQLite stores
//! - [`config`], [`clock`], [`model`], [`time`], [`error`]

pub mod blocking;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod retention;
pub mod slots;
pub mod special;
pub mod store;
pub mod time;

pub use blocking::BlockingEngine;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BusinessWindow, EngineConfig};
pub use engine::{AvailabilityEngine, DayOutcome, GenerationSummary};
pub use error::{EngineError, Result};
pub use model::{
    CalendarDay, CustomHours, DayKind, Location, Slot, SlotStatus, SpecialHours, SLOT_MINUTES,
};
pub use retention::RetentionSweeper;
pub use slots::{GeneratedDay, SlotGenerator};
pub use special::SpecialScheduleBuilder;
#[cfg(feature = "sqlite")]
pub use store::SqliteStore;
pub use store::{DayStore, MemoryStore, StoreError};
pub use time::{parse_date, SlotTime};
