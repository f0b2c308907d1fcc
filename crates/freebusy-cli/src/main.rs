//! `freebusy` CLI: merge calendar busy periods and find shared free slots.
//!
//! ## Usage
//!
//! ```sh
//! # Merge every calendar's busy periods (stdin → stdout)
//! cat freebusy.json | freebusy merge
//!
//! # Find 30-minute slots shared by two calendars
//! freebusy slots -i freebusy.json --calendar work --calendar home \
//!   --start 2026-03-16T09:00:00Z --end 2026-03-16T17:00:00Z --min-duration 30
//!
//! # Naive timestamps in, local times out
//! freebusy slots -i freebusy.json --calendar work --tz Europe/Zurich \
//!   --start 2026-03-16T09:00:00 --end 2026-03-16T17:00:00 --min-duration 60 --format text
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`,
//! `debug` with `--verbose`).

mod input;
mod render;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use freebusy_engine::{find_availability, merge_busy_periods, AvailabilityRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::input::{load_source, parse_datetime, parse_timezone};
use crate::render::{render_availability, render_timeline, OutputFormat};

#[derive(Parser)]
#[command(
    name = "freebusy",
    version,
    about = "Merge calendar busy periods and find shared free slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log solver progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the busy periods of every calendar in a free/busy document
    Merge {
        /// Input free/busy JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// IANA timezone for naive input times and for output
        #[arg(long, default_value = "UTC")]
        tz: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Find free slots shared by the given calendars
    Slots {
        /// Input free/busy JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Calendar id to include (repeatable or comma-separated)
        #[arg(long = "calendar", value_delimiter = ',')]
        calendars: Vec<String>,
        /// Start of the search window
        #[arg(long)]
        start: String,
        /// End of the search window
        #[arg(long)]
        end: String,
        /// Minimum free slot length in minutes
        #[arg(long, allow_negative_numbers = true)]
        min_duration: i64,
        /// IANA timezone for naive input times and for output
        #[arg(long, default_value = "UTC")]
        tz: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Merge {
            input,
            output,
            tz,
            format,
        } => {
            let tz = parse_timezone(&tz)?;
            let json = read_input(input.as_deref())?;
            let source = load_source(&json, tz)?;
            info!(calendars = source.calendar_ids().len(), "loaded free/busy document");

            let merged = merge_busy_periods(&source.all_busy_periods());
            let rendered = render_timeline(&merged, tz, format)?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Slots {
            input,
            output,
            calendars,
            start,
            end,
            min_duration,
            tz,
            format,
        } => {
            let tz = parse_timezone(&tz)?;
            let range_start = parse_datetime(&start, tz).context("Invalid --start")?;
            let range_end = parse_datetime(&end, tz).context("Invalid --end")?;
            let request = AvailabilityRequest::new(calendars, range_start, range_end, min_duration);
            request.validate().context("Invalid availability request")?;

            let json = read_input(input.as_deref())?;
            let source = load_source(&json, tz)?;
            info!(
                calendars = request.calendar_ids.len(),
                %range_start,
                %range_end,
                min_duration,
                "searching for free slots"
            );

            let response =
                find_availability(&source, &request).context("Invalid availability request")?;
            let rendered = render_availability(&response, tz, format)?;
            write_output(output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
