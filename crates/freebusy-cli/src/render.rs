//! Output rendering for the `freebusy` CLI.
//!
//! All instants are rendered in the caller's timezone. JSON output mirrors the
//! engine's response field names; text output is meant for terminals.

use std::fmt::{self, Write as _};

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::ValueEnum;
use freebusy_engine::{AvailabilityResponse, FreeSlot, Interval};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Serialize)]
struct PeriodOutput {
    start: String,
    end: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotOutput {
    start: String,
    end: String,
    duration_minutes: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityOutput {
    free_slots: Vec<SlotOutput>,
    merged_busy_periods: Vec<PeriodOutput>,
    unavailable_calendars: Vec<String>,
}

fn instant(dt: &DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).to_rfc3339()
}

fn period(iv: &Interval, tz: Tz) -> PeriodOutput {
    PeriodOutput {
        start: instant(&iv.start, tz),
        end: instant(&iv.end, tz),
    }
}

fn slot(s: &FreeSlot, tz: Tz) -> SlotOutput {
    SlotOutput {
        start: instant(&s.start, tz),
        end: instant(&s.end, tz),
        duration_minutes: s.duration_minutes,
    }
}

/// Render a merged busy timeline.
pub fn render_timeline(busy: &[Interval], tz: Tz, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let periods: Vec<PeriodOutput> = busy.iter().map(|iv| period(iv, tz)).collect();
            Ok(serde_json::to_string_pretty(&periods)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            write_busy_section(&mut out, busy, tz)?;
            Ok(out)
        }
    }
}

/// Render the result of an availability search.
pub fn render_availability(
    response: &AvailabilityResponse,
    tz: Tz,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let output = AvailabilityOutput {
                free_slots: response.free_slots.iter().map(|s| slot(s, tz)).collect(),
                merged_busy_periods: response
                    .merged_busy_periods
                    .iter()
                    .map(|iv| period(iv, tz))
                    .collect(),
                unavailable_calendars: response.unavailable_calendars.clone(),
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            if response.free_slots.is_empty() {
                out.push_str("No free slots found.\n");
            } else {
                writeln!(out, "Free slots ({}):", response.free_slots.len())?;
                for s in &response.free_slots {
                    writeln!(
                        out,
                        "  {} -> {} ({} min)",
                        instant(&s.start, tz),
                        instant(&s.end, tz),
                        s.duration_minutes
                    )?;
                }
            }
            out.push('\n');
            write_busy_section(&mut out, &response.merged_busy_periods, tz)?;
            if !response.unavailable_calendars.is_empty() {
                writeln!(
                    out,
                    "\nUnavailable calendars (treated as free): {}",
                    response.unavailable_calendars.join(", ")
                )?;
            }
            Ok(out)
        }
    }
}

fn write_busy_section(out: &mut String, busy: &[Interval], tz: Tz) -> fmt::Result {
    if busy.is_empty() {
        out.push_str("No busy periods.\n");
        return Ok(());
    }
    writeln!(out, "Busy periods ({}):", busy.len())?;
    for iv in busy {
        writeln!(out, "  {} -> {}", instant(&iv.start, tz), instant(&iv.end, tz))?;
    }
    Ok(())
}
