//! Year pillar (年柱).
//!
//! The pillar year starts at 입춘 (start of spring), fixed here at Feb 4.
//! Dates before that belong to the previous cycle year.

use ganji_time::CivilDate;

use crate::pillar::Pillar;

/// (month, day) on which the pillar year turns over.
pub const YEAR_BOUNDARY: (u32, u32) = (2, 4);

/// CE 4 is 甲子, the first position of the cycle.
pub const CYCLE_EPOCH_YEAR: i32 = 4;

/// Cycle year a date belongs to under the Feb-4 boundary.
pub fn cycle_year(date: CivilDate) -> i32 {
    if date.month_day() >= YEAR_BOUNDARY {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Year pillar of a date.
pub fn year_pillar(date: CivilDate) -> Pillar {
    year_pillar_of_cycle_year(cycle_year(date))
}

/// Year pillar of an already-resolved cycle year.
pub fn year_pillar_of_cycle_year(year: i32) -> Pillar {
    Pillar::from_cycle_index(i64::from(year) - i64::from(CYCLE_EPOCH_YEAR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CivilDate {
        CivilDate::new(y, m, day).unwrap()
    }

    #[test]
    fn epoch_and_1984_are_gapja() {
        assert_eq!(year_pillar_of_cycle_year(4).to_string(), "甲子");
        assert_eq!(year_pillar_of_cycle_year(1984).to_string(), "甲子");
    }

    #[test]
    fn boundary_is_inclusive() {
        assert_eq!(year_pillar(d(2024, 2, 3)).to_string(), "癸卯");
        assert_eq!(year_pillar(d(2024, 2, 4)).to_string(), "甲辰");
    }

    #[test]
    fn january_belongs_to_previous_year() {
        assert_eq!(cycle_year(d(1971, 1, 31)), 1970);
        assert_eq!(year_pillar(d(1971, 7, 7)).to_string(), "辛亥");
    }

    #[test]
    fn before_epoch() {
        // CE 3 → index -1 → 癸亥
        assert_eq!(year_pillar_of_cycle_year(3).to_string(), "癸亥");
        assert_eq!(year_pillar_of_cycle_year(-56).to_string(), "甲子");
    }
}
