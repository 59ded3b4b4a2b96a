//! Stem/branch tables and the four-pillar (사주) rule engine.
//!
//! This crate provides:
//! - The ten stems, twelve branches, and five elements as closed enums
//! - `Pillar`, a validated position of the 60-step cycle
//! - Year, month, day, and hour pillar rules
//! - The five-element tally and named time-slot presets
//!
//! Every rule is a pure function of a civil date and clock time. Solar-term
//! boundaries use fixed calendar days, not astronomical instants.

pub mod branch;
pub mod day;
pub mod element;
pub mod element_count;
pub mod error;
pub mod hour;
pub mod month;
pub mod pillar;
pub mod slot;
pub mod stem;
pub mod year;

pub use branch::{ALL_BRANCHES, Branch, MIDNIGHT_BRANCH};
pub use day::{DAY_CYCLE_ANCHOR, DAY_CYCLE_OFFSET, day_pillar, day_pillar_of_jdn};
pub use element::{ALL_ELEMENTS, Element};
pub use element_count::{ElementCounts, element_counts};
pub use error::BaseError;
pub use hour::{
    HourBranchInfo, HourConvention, HourKind, HourPillarInfo, KST_CORRECTION_MINUTES,
    MAX_CORRECTION_MINUTES, RatSplit, bucket_for_adjusted_minute, hour_branch, hour_pillar,
    hour_pillar_for_branch, hour_stem,
};
pub use month::{
    ActiveTerm, MONTH_BOUNDARIES, SolarTermBoundary, active_term, month_branch_and_start,
    month_pillar, month_pillar_for_branch,
};
pub use pillar::{CYCLE_LEN, Pillar};
pub use slot::{ALL_TIME_SLOTS, TimeSlot};
pub use stem::{ALL_STEMS, Stem};
pub use year::{CYCLE_EPOCH_YEAR, YEAR_BOUNDARY, cycle_year, year_pillar, year_pillar_of_cycle_year};
