//! Hour pillar (時柱): standard-time correction, the split 子 hour, and the
//! day-stem keyed hour-stem table (시두법).
//!
//! The wall clock is Korean standard time (UTC+9), half an hour ahead of
//! local mean time on the peninsula. Branch buckets are two hours wide on
//! the corrected clock, so on the raw clock they start at half-hours:
//! 子 23:30–01:30, 丑 01:30–03:30, … 亥 21:30–23:30.
//!
//! 子 straddles midnight. Its late-evening side takes the previous civil
//! day's day pillar (day correction −1), and the hour stem is derived from
//! that corrected day's stem.

use std::fmt::{Display, Formatter};

use ganji_time::{CivilDate, ClockTime};
use serde::{Deserialize, Serialize};

use crate::branch::{ALL_BRANCHES, Branch};
use crate::error::BaseError;
use crate::pillar::Pillar;
use crate::stem::Stem;

/// Minutes the wall clock runs ahead of local mean time (KST vs. 127.5°E).
pub const KST_CORRECTION_MINUTES: u16 = 30;

/// Largest correction accepted; keeps 子 straddling raw midnight.
pub const MAX_CORRECTION_MINUTES: u16 = 60;

const RAT_START: u32 = 23 * 60;
const RAT_END: u32 = 60;
const BUCKET_MINUTES: u32 = 120;

/// Starting stem of the 子 hour, indexed by day stem (甲..癸).
pub const RAT_HOUR_START_STEM: [Stem; 10] = [
    Stem::Gap,    // 甲
    Stem::Byeong, // 乙
    Stem::Mu,     // 丙
    Stem::Gyeong, // 丁
    Stem::Im,     // 戊
    Stem::Gap,    // 己
    Stem::Byeong, // 庚
    Stem::Mu,     // 辛
    Stem::Gyeong, // 壬
    Stem::Im,     // 癸
];

/// Where the 子 hour is cut into its late-evening and early-morning sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatSplit {
    /// Cut at corrected midnight: raw 23:30–00:30 is late, 00:30–01:30 early.
    #[default]
    AdjustedMidnight,
    /// Cut at raw midnight: raw 23:30–24:00 is late, 00:00–01:30 early.
    RawMidnight,
}

/// Clock convention used to bucket hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HourConvention {
    /// Minutes subtracted from the raw clock before bucketing.
    pub correction_minutes: u16,
    pub rat_split: RatSplit,
}

impl Default for HourConvention {
    fn default() -> Self {
        Self {
            correction_minutes: KST_CORRECTION_MINUTES,
            rat_split: RatSplit::default(),
        }
    }
}

impl HourConvention {
    /// Whether the correction keeps the bucketing well-defined.
    pub const fn is_valid(&self) -> bool {
        self.correction_minutes <= MAX_CORRECTION_MINUTES
    }
}

/// Which side of the hour table a time fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourKind {
    /// 야자시: 子 before the cut, day correction −1.
    LateRat,
    /// 조자시: 子 after the cut.
    EarlyRat,
    /// Any of 丑..亥.
    Regular,
}

impl HourKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LateRat => "late rat hour (야자시)",
            Self::EarlyRat => "early rat hour (조자시)",
            Self::Regular => "regular hour",
        }
    }
}

impl Display for HourKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of bucketing a raw clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourBranchInfo {
    pub branch: Branch,
    pub kind: HourKind,
    /// Days to add to the civil date before taking the day pillar (0 or −1).
    pub day_correction: i8,
    /// Clock after the standard-time correction.
    pub adjusted: ClockTime,
}

impl HourBranchInfo {
    pub fn is_late_evening(&self) -> bool {
        self.kind == HourKind::LateRat
    }
}

/// Branch whose bucket contains a corrected minute-of-day, if any.
///
/// The buckets tile the whole day, so `None` only signals a broken table.
pub fn bucket_for_adjusted_minute(minute: u32) -> Option<Branch> {
    let m = minute % 1440;
    if m >= RAT_START || m < RAT_END {
        return Some(Branch::Ja);
    }
    ALL_BRANCHES[1..].iter().copied().find(|b| {
        let start = RAT_END + BUCKET_MINUTES * (u32::from(b.index()) - 1);
        (start..start + BUCKET_MINUTES).contains(&m)
    })
}

/// Bucket a raw clock time into its hour branch and day correction.
pub fn hour_branch(clock: ClockTime, convention: &HourConvention) -> HourBranchInfo {
    let adjusted = clock.wrapping_sub_minutes(u32::from(convention.correction_minutes));
    let adj = adjusted.minute_of_day();
    let branch = bucket_for_adjusted_minute(adj).unwrap_or(Branch::Hae);

    if branch != Branch::Ja {
        return HourBranchInfo {
            branch,
            kind: HourKind::Regular,
            day_correction: 0,
            adjusted,
        };
    }

    let late = match convention.rat_split {
        RatSplit::AdjustedMidnight => adj >= RAT_START,
        // 子 never reaches raw noon, so the PM half is the pre-midnight side.
        RatSplit::RawMidnight => clock.minute_of_day() >= 12 * 60,
    };
    let (kind, day_correction) = if late {
        (HourKind::LateRat, -1)
    } else {
        (HourKind::EarlyRat, 0)
    };
    HourBranchInfo {
        branch,
        kind,
        day_correction,
        adjusted,
    }
}

/// Hour stem for a branch under a given day stem.
pub fn hour_stem(day_stem: Stem, branch: Branch) -> Stem {
    RAT_HOUR_START_STEM[day_stem.index() as usize].advance(i64::from(branch.index()))
}

/// Hour pillar for a branch under a given day stem.
pub fn hour_pillar_for_branch(day_stem: Stem, branch: Branch) -> Pillar {
    Pillar::from_parts(hour_stem(day_stem, branch), branch)
}

/// Full hour determination for one date/time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourPillarInfo {
    pub pillar: Pillar,
    pub branch: HourBranchInfo,
    /// Civil date after the day correction.
    pub day_date: CivilDate,
    /// Day pillar of `day_date`, whose stem keyed the hour stem.
    pub day_pillar: Pillar,
}

impl HourPillarInfo {
    pub fn day_correction(&self) -> i8 {
        self.branch.day_correction
    }

    pub fn is_late_evening(&self) -> bool {
        self.branch.is_late_evening()
    }
}

/// Hour pillar of a raw clock time on `date`.
///
/// `day_lookup` supplies the day pillar for the corrected date, so a caller
/// holding a reference table can answer from it instead of the rule engine.
pub fn hour_pillar<F>(
    date: CivilDate,
    clock: ClockTime,
    convention: &HourConvention,
    day_lookup: F,
) -> Result<HourPillarInfo, BaseError>
where
    F: FnOnce(CivilDate) -> Pillar,
{
    let branch = hour_branch(clock, convention);
    let day_date = date.add_days(i64::from(branch.day_correction))?;
    let day_pillar = day_lookup(day_date);
    Ok(HourPillarInfo {
        pillar: hour_pillar_for_branch(day_pillar.stem(), branch.branch),
        branch,
        day_date,
        day_pillar,
    })
}
