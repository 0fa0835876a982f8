//! `availability` CLI — generate, block, override, and retire calendar slots.
//!
//! ## Usage
//!
//! ```sh
//! # Generate today through today + 3 months (idempotent)
//! availability generate
//!
//! # Generate an explicit range
//! availability generate --from 2024-01-01 --to 2024-01-31
//!
//! # Delete days older than the retention horizon (30 days by default)
//! availability cleanup
//!
//! # Block 10:00-11:00 on a generated day
//! availability block 2024-01-02 10:00 11:00 "Staff meeting"
//!
//! # Replace a day with custom hours, or close it outright
//! availability special 2024-12-24 --reason "Short day" --hours 09:00-12:00
//! availability special 2024-12-25 --reason Holiday
//!
//! # Inspect a stored day as JSON
//! availability show 2024-01-02
//! ```
//!
//! Set `RUST_LOG=debug` for per-day logging on stderr.

use anyhow::{Context, Result};
use availability_engine::clock::{today_in, SystemClock};
use availability_engine::{
    parse_date, AvailabilityEngine, BlockingEngine, CustomHours, DayStore, EngineConfig,
    RetentionSweeper, SlotGenerator, SlotTime, SpecialScheduleBuilder, SqliteStore,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Manage bookable time slots for a service calendar"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database file
    #[arg(long, global = true, default_value = "availability.db")]
    db: PathBuf,

    /// TOML configuration file (built-in defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate default slots for a date range, skipping days that already exist
    Generate {
        /// First date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        from: Option<String>,
        /// Last date (YYYY-MM-DD), defaults to the configured horizon after the first date
        #[arg(long)]
        to: Option<String>,
    },
    /// Delete days older than the retention horizon
    Cleanup {
        /// Override the configured retention, in days
        #[arg(long)]
        retention_days: Option<u32>,
    },
    /// Block the slots starting in [START, END) on DATE
    Block {
        date: String,
        start: String,
        end: String,
        #[arg(default_value = "Blocked")]
        reason: String,
    },
    /// Make the slots starting in [START, END) on DATE available again
    Unblock {
        date: String,
        start: String,
        end: String,
    },
    /// Replace DATE with a special day built from custom hours
    Special {
        date: String,
        /// Why the day is special (kept on the record)
        #[arg(long)]
        reason: String,
        /// Open hours as HH:MM-HH:MM; repeatable. Omit to close the day.
        #[arg(long = "hours")]
        hours: Vec<String>,
    },
    /// Print the stored day as JSON
    Show { date: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let store = SqliteStore::open(&cli.db)
        .with_context(|| format!("Failed to open database: {}", cli.db.display()))?;
    debug!(db = %cli.db.display(), timezone = %config.timezone, "store opened");

    match cli.command {
        Commands::Generate { from, to } => {
            let generator = SlotGenerator::new(config.clone());
            let engine = AvailabilityEngine::new(&store, &generator);

            let summary = if from.is_none() && to.is_none() {
                engine.generate_horizon(&SystemClock)?
            } else {
                let start = match from {
                    Some(s) => parse_date(&s)?,
                    None => today_in(&SystemClock, config.tz()?),
                };
                let end = match to {
                    Some(s) => parse_date(&s)?,
                    None => engine.horizon_end(start)?,
                };
                engine
                    .generate_range(start, end)
                    .with_context(|| format!("Failed to generate {} to {}", start, end))?
            };
            println!("generated={} skipped={}", summary.generated, summary.skipped);
        }
        Commands::Cleanup { retention_days } => {
            let sweeper = RetentionSweeper::new(&store, &config, &SystemClock);
            let removed = match retention_days {
                Some(days) => sweeper.purge_older_than(days)?,
                None => sweeper.purge()?,
            };
            println!("removed={}", removed);
        }
        Commands::Block {
            date,
            start,
            end,
            reason,
        } => {
            let (date, start, end) = parse_window(&date, &start, &end)?;
            let blocked = BlockingEngine::new(&store)
                .block_window(date, start, end, &reason)
                .with_context(|| format!("Failed to block {} {}-{}", date, start, end))?;
            println!("blocked={}", blocked);
        }
        Commands::Unblock { date, start, end } => {
            let (date, start, end) = parse_window(&date, &start, &end)?;
            let unblocked = BlockingEngine::new(&store)
                .unblock_window(date, start, end)
                .with_context(|| format!("Failed to unblock {} {}-{}", date, start, end))?;
            println!("unblocked={}", unblocked);
        }
        Commands::Special {
            date,
            reason,
            hours,
        } => {
            let date = parse_date(&date)?;
            let custom_hours = hours
                .iter()
                .map(|h| h.parse::<CustomHours>())
                .collect::<Result<Vec<_>, _>>()?;
            let day = SpecialScheduleBuilder::new(&store, &config)
                .set_special_day(date, &reason, custom_hours)
                .with_context(|| format!("Failed to set special day {}", date))?;
            println!("slots={}", day.time_slots.len());
        }
        Commands::Show { date } => {
            let date = parse_date(&date)?;
            let day = store
                .find_day_by_date(date)?
                .with_context(|| format!("No calendar day stored for {}", date))?;
            println!("{}", serde_json::to_string_pretty(&day)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn parse_window(date: &str, start: &str, end: &str) -> Result<(NaiveDate, SlotTime, SlotTime)> {
    Ok((parse_date(date)?, start.parse()?, end.parse()?))
}
