use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::{DayStore, StoreError, StoreResult};
use crate::model::CalendarDay;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed store. Each day is one row holding the JSON document;
/// ISO date keys keep lexical and chronological order identical.
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> StoreResult<Self> {
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> StoreResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS calendar_days (
                date TEXT PRIMARY KEY,
                day_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.connection.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl DayStore for SqliteStore {
    fn find_day_by_date(&self, date: NaiveDate) -> StoreResult<Option<CalendarDay>> {
        let conn = self.lock()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT day_json FROM calendar_days WHERE date = ?1",
                params![date_key(date)],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn insert_day(&self, day: &CalendarDay) -> StoreResult<()> {
        let json = serde_json::to_string(day)?;
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO calendar_days (date, day_json) VALUES (?1, ?2)",
            params![date_key(day.date), json],
        )?;
        if inserted == 0 {
            return Err(StoreError::Duplicate(day.date));
        }
        Ok(())
    }

    fn save_day(&self, day: &CalendarDay) -> StoreResult<()> {
        let json = serde_json::to_string(day)?;
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE calendar_days SET day_json = ?2 WHERE date = ?1",
            params![date_key(day.date), json],
        )?;
        if updated == 0 {
            return Err(StoreError::Missing(day.date));
        }
        Ok(())
    }

    fn delete_day_by_date(&self, date: NaiveDate) -> StoreResult<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute(
            "DELETE FROM calendar_days WHERE date = ?1",
            params![date_key(date)],
        )?;
        Ok(deleted > 0)
    }

    fn delete_many_before(&self, cutoff: NaiveDate) -> StoreResult<usize> {
        let conn = self.lock()?;
        let deleted = conn.execute(
            "DELETE FROM calendar_days WHERE date < ?1",
            params![date_key(cutoff)],
        )?;
        Ok(deleted)
    }

    fn list_days(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<CalendarDay>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT day_json FROM calendar_days WHERE date >= ?1 AND date <= ?2 ORDER BY date ASC",
        )?;
        let rows = stmt.query_map(params![date_key(from), date_key(to)], |row| {
            row.get::<_, String>(0)
        })?;

        let mut days = Vec::new();
        for json in rows {
            days.push(serde_json::from_str(&json?)?);
        }
        Ok(days)
    }
}
