//! Error types for civil date and clock handling.

/// Errors from date/time construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Year/month/day do not name a proleptic Gregorian date.
    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    /// Hour/minute outside 00:00..=23:59.
    #[error("invalid clock time {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },
    /// Text could not be parsed as a date or time.
    #[error("cannot parse '{0}'")]
    Parse(String),
}
