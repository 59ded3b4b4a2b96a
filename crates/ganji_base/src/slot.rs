//! Named two-hour input slots.
//!
//! Birth times are often known only to the nearest branch hour. These
//! presets cover the raw (standard-time) clock, with 子 offered twice so the
//! caller can say which side of midnight was meant. Each slot carries a
//! representative clock time used for computation.

use std::fmt::{Display, Formatter};

use ganji_time::ClockTime;
use serde::{Deserialize, Serialize};

use crate::branch::Branch;

/// The 13 input slots, in the order they are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    LateRat,
    EarlyRat,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

pub const ALL_TIME_SLOTS: [TimeSlot; 13] = [
    TimeSlot::LateRat,
    TimeSlot::EarlyRat,
    TimeSlot::Chuk,
    TimeSlot::In,
    TimeSlot::Myo,
    TimeSlot::Jin,
    TimeSlot::Sa,
    TimeSlot::O,
    TimeSlot::Mi,
    TimeSlot::Sin,
    TimeSlot::Yu,
    TimeSlot::Sul,
    TimeSlot::Hae,
];

const LABELS: [&str; 13] = [
    "23:30–00:30",
    "00:30–01:30",
    "01:30–03:30",
    "03:30–05:30",
    "05:30–07:30",
    "07:30–09:30",
    "09:30–11:30",
    "11:30–13:30",
    "13:30–15:30",
    "15:30–17:30",
    "17:30–19:30",
    "19:30–21:30",
    "21:30–23:30",
];

impl TimeSlot {
    const fn position(self) -> usize {
        self as usize
    }

    /// Raw clock range, e.g. `21:30–23:30`.
    pub fn label(self) -> &'static str {
        LABELS[self.position()]
    }

    pub fn branch(self) -> Branch {
        match self {
            Self::LateRat | Self::EarlyRat => Branch::Ja,
            // 丑 sits at slot 2 and branch 1, and so on.
            other => Branch::from_index(other.position() as i64 - 1),
        }
    }

    /// Clock time used when computing from this slot.
    pub fn representative(self) -> ClockTime {
        let (h, m) = match self {
            Self::LateRat => (23, 40),
            Self::EarlyRat => (0, 40),
            other => ((2 * (other.position() as u32 - 2) + 2) % 24, 30),
        };
        ClockTime::from_minute_of_day(h * 60 + m)
    }

    /// Look up a slot by label. `-` is accepted in place of `–`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().replace('-', "–");
        LABELS
            .iter()
            .position(|l| *l == normalized)
            .map(|i| ALL_TIME_SLOTS[i])
    }

    pub fn all() -> &'static [TimeSlot; 13] {
        &ALL_TIME_SLOTS
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LateRat => write!(f, "{} (子 late)", self.label()),
            Self::EarlyRat => write!(f, "{} (子 early)", self.label()),
            other => write!(f, "{} ({})", other.label(), other.branch()),
        }
    }
}
