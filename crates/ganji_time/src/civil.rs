//! Civil calendar date and wall-clock time.
//!
//! `CivilDate` is the canonical date type used throughout the engine. It is
//! always a valid proleptic Gregorian date, so every conversion to and from
//! a Julian Day Number is exact.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{MAX_YEAR, MIN_YEAR, calendar_to_jdn, days_in_month, jdn_to_calendar};

/// Proleptic Gregorian calendar date.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CivilDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CivilDate {
    /// Build a date, rejecting anything that is not on the calendar.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year)
            || !(1..=12).contains(&month)
            || day == 0
            || day > days_in_month(year, month)
        {
            return Err(TimeError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Date of a Julian Day Number.
    pub fn from_jdn(jdn: i64) -> Result<Self, TimeError> {
        let (year, month, day) = jdn_to_calendar(jdn);
        Self::new(year, month, day)
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    pub const fn day(self) -> u32 {
        self.day
    }

    /// `(month, day)` pair, convenient for comparing against fixed yearly markers.
    pub const fn month_day(self) -> (u32, u32) {
        (self.month, self.day)
    }

    /// Julian Day Number (noon-based integer day count).
    pub fn jdn(self) -> i64 {
        calendar_to_jdn(self.year, self.month, self.day)
    }

    /// Shift by a signed number of days.
    pub fn add_days(self, days: i64) -> Result<Self, TimeError> {
        Self::from_jdn(self.jdn() + days)
    }

    /// The previous calendar day.
    pub fn pred(self) -> Result<Self, TimeError> {
        self.add_days(-1)
    }

    /// The next calendar day.
    pub fn succ(self) -> Result<Self, TimeError> {
        self.add_days(1)
    }
}

impl Display for CivilDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}-{:02}-{:02}", -self.year, self.month, self.day)
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl FromStr for CivilDate {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD` (a leading `-` marks a negative year).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TimeError::Parse(s.to_string());
        let (sign, body) = match s.trim().strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s.trim()),
        };
        let mut parts = body.split('-');
        let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };
        let year: i32 = y.parse().map_err(|_| bad())?;
        let month: u32 = m.parse().map_err(|_| bad())?;
        let day: u32 = d.parse().map_err(|_| bad())?;
        Self::new(sign * year, month, day)
    }
}

impl TryFrom<String> for CivilDate {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CivilDate> for String {
    fn from(value: CivilDate) -> Self {
        value.to_string()
    }
}

/// Minutes in a civil day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Wall-clock time of day at minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    /// Build a clock time in 00:00..=23:59.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 || minute > 59 {
            return Err(TimeError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Clock time from a minute-of-day, wrapping modulo 24h.
    pub const fn from_minute_of_day(minutes: u32) -> Self {
        let m = minutes % MINUTES_PER_DAY;
        Self {
            hour: m / 60,
            minute: m % 60,
        }
    }

    pub const fn hour(self) -> u32 {
        self.hour
    }

    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// Minutes since 00:00 (0..1440).
    pub const fn minute_of_day(self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Shift backwards by `minutes`, wrapping across midnight.
    pub const fn wrapping_sub_minutes(self, minutes: u32) -> Self {
        let m = minutes % MINUTES_PER_DAY;
        Self::from_minute_of_day(self.minute_of_day() + MINUTES_PER_DAY - m)
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Parse `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TimeError::Parse(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(bad)?;
        let hour: u32 = h.parse().map_err(|_| bad())?;
        let minute: u32 = m.parse().map_err(|_| bad())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_dates() {
        assert!(CivilDate::new(2023, 2, 29).is_err());
        assert!(CivilDate::new(2024, 2, 29).is_ok());
        assert!(CivilDate::new(2024, 0, 1).is_err());
        assert!(CivilDate::new(2024, 4, 31).is_err());
        assert!(CivilDate::new(10_000, 1, 1).is_err());
    }

    #[test]
    fn day_arithmetic_crosses_year_end() {
        let d = CivilDate::new(2024, 1, 1).unwrap();
        assert_eq!(d.pred().unwrap(), CivilDate::new(2023, 12, 31).unwrap());
        assert_eq!(d.add_days(60).unwrap(), CivilDate::new(2024, 3, 1).unwrap());
    }

    #[test]
    fn display_and_parse() {
        let d: CivilDate = "1971-07-07".parse().unwrap();
        assert_eq!(d, CivilDate::new(1971, 7, 7).unwrap());
        assert_eq!(d.to_string(), "1971-07-07");
        let neg: CivilDate = "-0044-03-15".parse().unwrap();
        assert_eq!(neg.year(), -44);
        assert_eq!(neg.to_string(), "-0044-03-15");
        assert!("1971-7".parse::<CivilDate>().is_err());
        assert!("1971-07-07-01".parse::<CivilDate>().is_err());
    }

    #[test]
    fn ordering_is_chronological() {
        let a = CivilDate::new(2023, 12, 31).unwrap();
        let b = CivilDate::new(2024, 1, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn clock_time_validation() {
        assert!(ClockTime::new(24, 0).is_err());
        assert!(ClockTime::new(23, 60).is_err());
        assert_eq!(ClockTime::new(23, 59).unwrap().minute_of_day(), 1439);
    }

    #[test]
    fn clock_wraps_backwards_over_midnight() {
        let t = ClockTime::new(0, 10).unwrap();
        assert_eq!(t.wrapping_sub_minutes(30), ClockTime::new(23, 40).unwrap());
        assert_eq!(
            ClockTime::new(1, 30).unwrap().wrapping_sub_minutes(30),
            ClockTime::new(1, 0).unwrap()
        );
    }

    #[test]
    fn clock_parse() {
        let t: ClockTime = "22:30".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (22, 30));
        assert_eq!(t.to_string(), "22:30");
        assert!("2230".parse::<ClockTime>().is_err());
    }

    #[test]
    fn serde_uses_iso_strings() {
        let d = CivilDate::new(2024, 2, 4).unwrap();
        let s = serde_json::to_string(&d).unwrap();
        assert_eq!(s, "\"2024-02-04\"");
        let back: CivilDate = serde_json::from_str(&s).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<CivilDate>("\"2023-02-29\"").is_err());
    }
}
