//! Month pillar (月柱) from the twelve fixed solar-term boundaries (절입일).
//!
//! Each pillar month begins on a 節 solar term. The boundary dates are the
//! conventional calendar-day approximations and may differ from the true
//! astronomical instant by one or two days.

use ganji_time::{CivilDate, TimeError};

use crate::branch::Branch;
use crate::pillar::Pillar;
use crate::stem::Stem;

/// One month-opening solar term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarTermBoundary {
    /// Branch of the month the term opens.
    pub branch: Branch,
    /// Fixed calendar month of the term.
    pub month: u32,
    /// Fixed calendar day of the term.
    pub day: u32,
    /// Korean name of the term.
    pub name: &'static str,
}

/// The twelve boundaries, in calendar order within a civil year.
pub const MONTH_BOUNDARIES: [SolarTermBoundary; 12] = [
    SolarTermBoundary { branch: Branch::Chuk, month: 1, day: 6, name: "소한" },
    SolarTermBoundary { branch: Branch::In, month: 2, day: 4, name: "입춘" },
    SolarTermBoundary { branch: Branch::Myo, month: 3, day: 5, name: "경칩" },
    SolarTermBoundary { branch: Branch::Jin, month: 4, day: 5, name: "청명" },
    SolarTermBoundary { branch: Branch::Sa, month: 5, day: 5, name: "입하" },
    SolarTermBoundary { branch: Branch::O, month: 6, day: 6, name: "망종" },
    SolarTermBoundary { branch: Branch::Mi, month: 7, day: 7, name: "소서" },
    SolarTermBoundary { branch: Branch::Sin, month: 8, day: 7, name: "입추" },
    SolarTermBoundary { branch: Branch::Yu, month: 9, day: 8, name: "백로" },
    SolarTermBoundary { branch: Branch::Sul, month: 10, day: 8, name: "한로" },
    SolarTermBoundary { branch: Branch::Hae, month: 11, day: 7, name: "입동" },
    SolarTermBoundary { branch: Branch::Ja, month: 12, day: 7, name: "대설" },
];

/// Starting stem of the 寅 month, indexed by year stem (甲..癸).
pub const TIGER_MONTH_START_STEM: [Stem; 10] = [
    Stem::Byeong, // 甲
    Stem::Mu,     // 乙
    Stem::Gyeong, // 丙
    Stem::Im,     // 丁
    Stem::Gap,    // 戊
    Stem::Byeong, // 己
    Stem::Mu,     // 庚
    Stem::Gyeong, // 辛
    Stem::Im,     // 壬
    Stem::Gap,    // 癸
];

/// The boundary in force for a date, with the civil year it fell in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTerm {
    pub boundary: SolarTermBoundary,
    /// Civil year of the boundary date (the previous year for Jan 1-5).
    pub year: i32,
}

impl ActiveTerm {
    /// Concrete date the boundary fell on.
    pub fn start_date(&self) -> Result<CivilDate, TimeError> {
        CivilDate::new(self.year, self.boundary.month, self.boundary.day)
    }
}

/// Latest boundary not after `date` (ties go to the boundary itself).
pub fn active_term(date: CivilDate) -> ActiveTerm {
    let md = date.month_day();
    match MONTH_BOUNDARIES
        .iter()
        .rev()
        .find(|b| md >= (b.month, b.day))
    {
        Some(b) => ActiveTerm {
            boundary: *b,
            year: date.year(),
        },
        // Jan 1-5: still inside the previous year's 子 month.
        None => ActiveTerm {
            boundary: MONTH_BOUNDARIES[11],
            year: date.year() - 1,
        },
    }
}

/// Month branch and the date its month began.
pub fn month_branch_and_start(date: CivilDate) -> Result<(Branch, CivilDate), TimeError> {
    let term = active_term(date);
    Ok((term.boundary.branch, term.start_date()?))
}

/// Month pillar for a branch under a given year stem.
pub fn month_pillar_for_branch(branch: Branch, year_stem: Stem) -> Pillar {
    let start = TIGER_MONTH_START_STEM[year_stem.index() as usize];
    let stem = start.advance(i64::from(branch.month_ordinal()));
    Pillar::from_parts(stem, branch)
}

/// Month pillar of a date. `year_stem` is the stem of the date's year pillar.
pub fn month_pillar(date: CivilDate, year_stem: Stem) -> Pillar {
    month_pillar_for_branch(active_term(date).boundary.branch, year_stem)
}
