//! # freebusy-engine
//!
//! Multi-calendar availability solving for calendar agents.
//!
//! Several calendars report busy time independently, often overlapping. The
//! engine merges it into one canonical busy timeline and finds every free slot
//! of at least a requested length inside a search window. All computation is
//! pure and synchronous over absolute (`DateTime<Utc>`) instants; fetching the
//! busy data is left to a [`BusyPeriodSource`] implementation.
//!
//! ## Modules
//!
//! - [`interval`] - `Interval` and `SearchWindow` value types
//! - [`merge`] - Flatten and merge raw busy periods into a sorted timeline
//! - [`freebusy`] - Walk a merged timeline to find free slots
//! - [`source`] - The busy-period source trait and an in-memory source
//! - [`availability`] - Request validation and the end-to-end solver
//! - [`error`] - Error types

pub mod availability;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod merge;
pub mod source;

pub use availability::{
    find_availability, find_availability_in, AvailabilityRequest, AvailabilityResponse,
};
pub use error::{AvailabilityError, SourceError};
pub use freebusy::{find_first_free_slot, find_free_slots, FreeSlot};
pub use interval::{Interval, SearchWindow};
pub use merge::{flatten_busy_data, merge_busy_data, merge_busy_periods, RawBusyData};
pub use source::{BusyPeriodSource, StaticBusySource};
