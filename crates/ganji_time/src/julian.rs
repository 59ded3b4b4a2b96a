//! Julian Day Number ↔ proleptic Gregorian calendar conversions.
//!
//! Integer-only Fliegel/Van Flandern forward formula and Richards' inverse.
//! Floor division is used throughout, so both directions stay exact for
//! negative (astronomical) years as well.

/// JDN of 2000-01-01 (Gregorian).
pub const J2000_JDN: i64 = 2_451_545;

/// Supported year range, inclusive.
pub const MIN_YEAR: i32 = -9999;
pub const MAX_YEAR: i32 = 9999;

/// Leap year in the proleptic Gregorian calendar.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`; 0 for an invalid month.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Julian Day Number of a Gregorian calendar date.
///
/// The caller is responsible for passing a valid date; see
/// [`crate::CivilDate::new`].
pub fn calendar_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let m = i64::from(month);
    let a = (14 - m).div_euclid(12);
    let y = i64::from(year) + 4800 - a;
    let mp = m + 12 * a - 3;
    i64::from(day) + (153 * mp + 2).div_euclid(5) + 365 * y + y.div_euclid(4)
        - y.div_euclid(100)
        + y.div_euclid(400)
        - 32_045
}

/// Gregorian calendar date `(year, month, day)` of a Julian Day Number.
pub fn jdn_to_calendar(jdn: i64) -> (i32, u32, u32) {
    let f = jdn + 1401 + ((4 * jdn + 274_277).div_euclid(146_097) * 3).div_euclid(4) - 38;
    let e = 4 * f + 3;
    let g = e.rem_euclid(1461).div_euclid(4);
    let h = 5 * g + 2;
    let day = h.rem_euclid(153).div_euclid(5) + 1;
    let month = (h.div_euclid(153) + 2).rem_euclid(12) + 1;
    let year = e.div_euclid(1461) - 4716 + (14 - month).div_euclid(12);
    // month/day are bounded by construction; year by the caller's JDN range
    (year as i32, month as u32, day as u32)
}
