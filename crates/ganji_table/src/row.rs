//! Row model of the reference table.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use ganji_base::Pillar;
use ganji_time::{CivilDate, ClockTime};
use serde::{Deserialize, Serialize};

/// A date in the Korean lunisolar calendar.
///
/// `leap` marks an intercalary month (윤달), which repeats the number of the
/// month before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLunarDate")]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub leap: bool,
}

/// Unvalidated wire form of [`LunarDate`].
#[derive(Deserialize)]
struct RawLunarDate {
    year: i32,
    month: u32,
    day: u32,
    #[serde(default)]
    leap: bool,
}

impl TryFrom<RawLunarDate> for LunarDate {
    type Error = String;

    fn try_from(raw: RawLunarDate) -> Result<Self, Self::Error> {
        Self::checked(raw.year, raw.month, raw.day, raw.leap)
    }
}

impl LunarDate {
    pub const fn new(year: i32, month: u32, day: u32, leap: bool) -> Self {
        Self {
            year,
            month,
            day,
            leap,
        }
    }

    /// Like [`LunarDate::new`], rejecting months outside 1-12 and days
    /// outside 1-30.
    pub fn checked(year: i32, month: u32, day: u32, leap: bool) -> Result<Self, String> {
        if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
            let date = Self::new(year, month, day, leap);
            return Err(format!("lunar date out of range '{date}'"));
        }
        Ok(Self::new(year, month, day, leap))
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.leap {
            f.write_str("L")?;
        }
        Ok(())
    }
}

impl FromStr for LunarDate {
    type Err = String;

    /// Parse `YYYY-MM-DD`, with a trailing `L` for a leap month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (body, leap) = match s.strip_suffix('L') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let parts: Vec<&str> = body.split('-').collect();
        if parts.len() != 3 {
            return Err(format!("bad lunar date '{s}'"));
        }
        let year: i32 = parts[0]
            .parse()
            .map_err(|_| format!("bad year in lunar date '{s}'"))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| format!("bad month in lunar date '{s}'"))?;
        let day: u32 = parts[2]
            .parse()
            .map_err(|_| format!("bad day in lunar date '{s}'"))?;
        Self::checked(year, month, day, leap)
    }
}

/// One day of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Solar (Gregorian) date, the table key.
    pub solar: CivilDate,
    /// Lunar date of the same day, when the source provides it.
    #[serde(default)]
    pub lunar: Option<LunarDate>,
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    /// Standard-time instant a month-opening solar term begins on this date.
    #[serde(default)]
    pub term_start: Option<ClockTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lunar_parse_and_display() {
        let d: LunarDate = "1976-08-15L".parse().unwrap();
        assert_eq!(d, LunarDate::new(1976, 8, 15, true));
        assert_eq!(d.to_string(), "1976-08-15L");
        let plain: LunarDate = "1971-05-15".parse().unwrap();
        assert!(!plain.leap);
        assert!("1971-13-01".parse::<LunarDate>().is_err());
        assert!("1971-05".parse::<LunarDate>().is_err());
    }

    #[test]
    fn lunar_json_is_range_checked() {
        let ok: LunarDate =
            serde_json::from_str(r#"{"year":1971,"month":5,"day":15}"#).unwrap();
        assert_eq!(ok, LunarDate::new(1971, 5, 15, false));
        assert!(serde_json::from_str::<LunarDate>(r#"{"year":2023,"month":13,"day":0}"#).is_err());
        assert!(serde_json::from_str::<LunarDate>(r#"{"year":2023,"month":2,"day":31,"leap":true}"#).is_err());
    }
}
