//! Civil calendar primitives for the ganji engine.
//!
//! This crate provides:
//! - Julian Day Number ↔ proleptic Gregorian conversions
//! - `CivilDate`, a validated calendar date with day arithmetic
//! - `ClockTime`, a minute-resolution wall-clock time

pub mod civil;
pub mod error;
pub mod julian;

pub use civil::{CivilDate, ClockTime, MINUTES_PER_DAY};
pub use error::TimeError;
pub use julian::{J2000_JDN, calendar_to_jdn, days_in_month, is_leap_year, jdn_to_calendar};
