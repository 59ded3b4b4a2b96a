//! Day pillar (日柱) from the Julian Day Number.
//!
//! The day cycle runs unbroken, so the pillar is `(JDN + offset) mod 60`.
//! The offset is calibrated on the anchor date 1984-02-02 = 甲子.

use ganji_time::CivilDate;

use crate::pillar::Pillar;

/// Calibration anchor whose day pillar is 甲子.
pub const DAY_CYCLE_ANCHOR: (i32, u32, u32) = (1984, 2, 2);

/// Offset added to the JDN so the anchor lands on cycle index 0.
pub const DAY_CYCLE_OFFSET: i64 = 47;

/// Day pillar of a date.
pub fn day_pillar(date: CivilDate) -> Pillar {
    day_pillar_of_jdn(date.jdn())
}

/// Day pillar of a Julian Day Number.
pub fn day_pillar_of_jdn(jdn: i64) -> Pillar {
    Pillar::from_cycle_index(jdn + DAY_CYCLE_OFFSET)
}

#[cfg(test)]
mod tests {
    use ganji_time::calendar_to_jdn;

    use super::*;
    use crate::pillar::CYCLE_LEN;

    fn d(y: i32, m: u32, day: u32) -> CivilDate {
        CivilDate::new(y, m, day).unwrap()
    }

    #[test]
    fn offset_matches_anchor() {
        let (y, m, day) = DAY_CYCLE_ANCHOR;
        let implied = (-calendar_to_jdn(y, m, day)).rem_euclid(i64::from(CYCLE_LEN));
        assert_eq!(implied, DAY_CYCLE_OFFSET);
    }

    #[test]
    fn anchor_is_gapja() {
        assert_eq!(day_pillar(d(1984, 2, 2)).to_string(), "甲子");
    }

    #[test]
    fn consecutive_days_step_once() {
        let a = day_pillar(d(1999, 12, 31));
        let b = day_pillar(d(2000, 1, 1));
        assert_eq!(a.advance(1), b);
    }

    #[test]
    fn known_values() {
        assert_eq!(day_pillar(d(1971, 7, 7)).to_string(), "辛卯");
        assert_eq!(day_pillar(d(2024, 2, 4)).to_string(), "丙申");
        assert_eq!(day_pillar(d(2000, 2, 29)).to_string(), "乙卯");
        assert_eq!(day_pillar(d(2000, 3, 1)).to_string(), "丙辰");
    }
}
