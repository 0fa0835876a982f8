//! Engine configuration: business hours, closed weekdays, defaults, retention.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file)
//! yields the standard Monday-Saturday schedule.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::Location;
use crate::time::SlotTime;

/// A contiguous span of opening hours, end-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessWindow {
    pub start: SlotTime,
    pub end: SlotTime,
}

impl BusinessWindow {
    pub fn new(start: SlotTime, end: SlotTime) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA zone name recorded on every stored day and used to compute "today".
    pub timezone: String,
    /// Weekdays on which default generation creates no record.
    pub closed_weekdays: Vec<Weekday>,
    /// Opening hours for regular days, ordered and non-overlapping.
    pub business_hours: Vec<BusinessWindow>,
    pub default_service_types: BTreeSet<String>,
    pub default_location: Location,
    /// Days of history kept by the retention sweep.
    pub retention_days: u32,
    /// How far ahead the default generation run reaches.
    pub horizon_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: "America/New_York".to_string(),
            closed_weekdays: vec![Weekday::Sun],
            business_hours: vec![
                BusinessWindow::new(SlotTime::at(9, 0), SlotTime::at(12, 0)),
                BusinessWindow::new(SlotTime::at(13, 0), SlotTime::at(18, 0)),
            ],
            default_service_types: ["consultation", "follow_up"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_location: Location::InPerson,
            retention_days: 30,
            horizon_months: 3,
        }
    }
}

impl EngineConfig {
    /// Read and validate a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EngineError::Validation(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| EngineError::Validation(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.tz()?;

        let mut previous_end: Option<SlotTime> = None;
        for window in &self.business_hours {
            if window.start >= window.end {
                return Err(EngineError::Validation(format!(
                    "business window {}-{} must start before it ends",
                    window.start, window.end
                )));
            }
            if let Some(end) = previous_end {
                if window.start < end {
                    return Err(EngineError::Validation(format!(
                        "business window starting {} overlaps or precedes the window ending {}",
                        window.start, end
                    )));
                }
            }
            previous_end = Some(window.end);
        }
        Ok(())
    }

    /// The configured zone, parsed.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| EngineError::Validation(format!("invalid timezone: {}", self.timezone)))
    }

    pub fn is_closed(&self, weekday: Weekday) -> bool {
        self.closed_weekdays.contains(&weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.is_closed(Weekday::Sun));
        assert!(!config.is_closed(Weekday::Sat));
    }

    #[test]
    fn overrides_are_read() {
        let config = EngineConfig::from_toml_str(
            r#"
            timezone = "Europe/London"
            closed_weekdays = ["Sat", "Sun"]
            default_location = "online"
            retention_days = 7

            [[business_hours]]
            start = "08:00"
            end = "10:30"
            "#,
        )
        .unwrap();
        assert_eq!(config.timezone, "Europe/London");
        assert_eq!(config.closed_weekdays, vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(config.default_location, Location::Online);
        assert_eq!(config.retention_days, 7);
        assert_eq!(config.business_hours.len(), 1);
        assert_eq!(config.business_hours[0].end.to_string(), "10:30");
        assert_eq!(config.horizon_months, 3);
    }

    #[test]
    fn rejects_unknown_timezone() {
        let err = EngineConfig::from_toml_str(r#"timezone = "Mars/Olympus""#).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn rejects_inverted_and_overlapping_windows() {
        let inverted = r#"
            [[business_hours]]
            start = "12:00"
            end = "09:00"
        "#;
        assert!(EngineConfig::from_toml_str(inverted).is_err());

        let overlapping = r#"
            [[business_hours]]
            start = "09:00"
            end = "12:00"
            [[business_hours]]
            start = "11:00"
            end = "13:00"
        "#;
        assert!(EngineConfig::from_toml_str(overlapping).is_err());
    }

    #[test]
    fn rejects_malformed_time_strings() {
        let bad = r#"
            [[business_hours]]
            start = "9am"
            end = "12:00"
        "#;
        assert!(EngineConfig::from_toml_str(bad).is_err());
    }
}
