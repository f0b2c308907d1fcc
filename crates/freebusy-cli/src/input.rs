//! Free/busy document parsing.
//!
//! Documents follow the shape of a free/busy query response:
//!
//! ```json
//! {
//!   "calendars": {
//!     "work":   { "busy": [{ "start": "2026-03-16T10:00:00Z", "end": "2026-03-16T11:00:00Z" }] },
//!     "shared": { "busy": [], "errors": [{ "domain": "global", "reason": "notFound" }] },
//!     "home":   [{ "start": "2026-03-16T12:00:00", "end": "2026-03-16T13:00:00" }]
//!   }
//! }
//! ```
//!
//! A calendar may be given as a bare array of periods. A calendar with a
//! non-empty `errors` list is loaded as unavailable. Timestamps without an
//! offset are interpreted in the caller's timezone.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use freebusy_engine::{Interval, StaticBusySource};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FreeBusyDocument {
    #[serde(default)]
    pub calendars: BTreeMap<String, CalendarEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CalendarEntry {
    Periods(Vec<PeriodInput>),
    Detailed {
        #[serde(default)]
        busy: Vec<PeriodInput>,
        #[serde(default)]
        errors: Vec<CalendarErrorInput>,
    },
}

#[derive(Debug, Deserialize)]
pub struct PeriodInput {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarErrorInput {
    #[serde(default)]
    pub domain: Option<String>,
    pub reason: String,
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| anyhow!("Unknown timezone: '{}'", name))
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with offset, e.g. "2026-03-16T14:00:00+01:00") and naive
/// local time (e.g. "2026-03-16T14:00:00"), which is interpreted in `tz`. Naive
/// times that fall in a DST gap or overlap are rejected.
pub fn parse_datetime(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .with_context(|| format!("Invalid datetime '{}'", s))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, later) => bail!(
            "Ambiguous local time '{}' in {}: could be {} or {}",
            s,
            tz,
            earlier.to_rfc3339(),
            later.to_rfc3339()
        ),
        LocalResult::None => bail!("Local time '{}' does not exist in {}", s, tz),
    }
}

fn parse_period(period: &PeriodInput, tz: Tz) -> Result<Interval> {
    let start = parse_datetime(&period.start, tz)?;
    let end = parse_datetime(&period.end, tz)?;
    Ok(Interval::new(start, end)?)
}

/// Parse a free/busy document into an in-memory busy-period source.
pub fn load_source(json: &str, tz: Tz) -> Result<StaticBusySource> {
    let document: FreeBusyDocument =
        serde_json::from_str(json).context("Invalid free/busy JSON")?;

    let mut source = StaticBusySource::new();
    for (calendar_id, entry) in document.calendars {
        let (busy, errors) = match entry {
            CalendarEntry::Periods(busy) => (busy, Vec::new()),
            CalendarEntry::Detailed { busy, errors } => (busy, errors),
        };

        if !errors.is_empty() {
            let reason = errors
                .iter()
                .map(|e| match &e.domain {
                    Some(domain) => format!("{}: {}", domain, e.reason),
                    None => e.reason.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            source.insert_failure(calendar_id, reason);
            continue;
        }

        let intervals = busy
            .iter()
            .map(|period| parse_period(period, tz))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Invalid busy period in calendar '{}'", calendar_id))?;
        source.insert_calendar(calendar_id, intervals);
    }

    Ok(source)
}
