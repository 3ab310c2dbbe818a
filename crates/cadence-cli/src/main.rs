//! `cadence` CLI: list, search and check recurring events from the command line.
//!
//! Events are read as JSON (see `cadence_engine::codec`) from a file or stdin.
//!
//! ## Usage
//!
//! ```sh
//! # Next 5 occurrences of an event
//! cadence next -n 5 -i standup.json
//!
//! # First occurrence after the end of a day (zone defaults to the event's)
//! cadence after --date 2025-04-01 -i standup.json
//!
//! # Every occurrence before a date, for one event or a whole calendar
//! cadence before --date 2025-03-01 -i calendar.json --json
//!
//! # Overlapping events in a calendar
//! cadence conflicts -i calendar.json
//!
//! # RFC 5545 rendering of an event's rule
//! cadence rrule -i standup.json
//! ```
//!
//! Set `CADENCE_LOG=debug` to see engine logs on stderr.

use anyhow::{Context, Result};
use cadence_engine::{Calendar, Event};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cadence",
    version,
    about = "Recurring calendar events from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the next occurrences of an event, starting with itself
    Next {
        /// Input event JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Number of occurrences
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
        /// Print occurrences as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Find the first occurrence strictly after a date (23:59) or date and time
    After {
        /// Input event JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Cutoff date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Cutoff time, HH:MM (end of day if omitted)
        #[arg(long)]
        time: Option<String>,
        /// Zone of the cutoff (the event's zone if omitted)
        #[arg(long)]
        tz: Option<String>,
        /// Print the occurrence as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every occurrence before a date (exclusive)
    Before {
        /// Input event or array of events (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Cutoff date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Print occurrences as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// List overlapping pairs in an array of events
    Conflicts {
        /// Input array of events (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print an event's recurrence as an RFC 5545 RRULE
    Rrule {
        /// Input event JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CADENCE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Next { input, count, json } => {
            let mut event = parse_event(&read_input(input.as_deref())?)?;
            let occurrences = event.next(count);
            print_events(&occurrences, json)?;
        }
        Commands::After {
            input,
            date,
            time,
            tz,
            json,
        } => {
            let mut event = parse_event(&read_input(input.as_deref())?)?;
            let zone = tz.unwrap_or_else(|| event.timezone_name().to_string());
            let time = time.unwrap_or_else(|| "23:59".to_string());
            debug!(%date, %time, %zone, "searching for next occurrence");

            let next = event
                .next_after_time(&date, &time, &zone)
                .context("Invalid cutoff")?;
            match next {
                Some(next) => print_events(std::slice::from_ref(&next), json)?,
                None => anyhow::bail!("No occurrence after {} {} {}", date, time, zone),
            }
        }
        Commands::Before { input, date, json } => {
            let calendar = parse_calendar(&read_input(input.as_deref())?)?;
            let occurrences = calendar
                .all_before(&date)
                .with_context(|| format!("Invalid cutoff date: {}", date))?;
            print_events(&occurrences, json)?;
        }
        Commands::Conflicts { input } => {
            let calendar = parse_calendar(&read_input(input.as_deref())?)?;
            for conflict in calendar.conflicts() {
                println!(
                    "{} <> {} ({} min)",
                    conflict.event_a, conflict.event_b, conflict.overlap_minutes
                );
            }
        }
        Commands::Rrule { input } => {
            let event = parse_event(&read_input(input.as_deref())?)?;
            if let Some(rule) = event.recurrence() {
                println!("{}", rule.to_rrule());
            }
        }
    }

    Ok(())
}

fn parse_event(json: &str) -> Result<Event> {
    Event::from_json(json).context("Failed to parse event JSON")
}

/// Accept either a single event object or an array of events.
fn parse_calendar(json: &str) -> Result<Calendar> {
    let value: serde_json::Value =
        serde_json::from_str(json).context("Failed to parse calendar JSON")?;
    let events: Vec<Event> = if value.is_array() {
        serde_json::from_value(value).context("Failed to parse events")?
    } else {
        vec![serde_json::from_value(value).context("Failed to parse event")?]
    };
    Ok(Calendar::from_events(events))
}

fn print_events(events: &[Event], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(events)?);
    } else {
        for event in events {
            println!("{}", event);
        }
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
