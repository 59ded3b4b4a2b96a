//! Pillars: one (stem, branch) position of the 60-step sexagenary cycle.
//!
//! The 10-cycle and 12-cycle advance together, so only pairs whose stem and
//! branch indices share parity occur. Index `i` of the 60-cycle is the pair
//! `(i mod 10, i mod 12)`; the inverse is `(6·stem − 5·branch) mod 60`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Element;
use crate::error::BaseError;
use crate::stem::Stem;

/// Length of the sexagenary cycle.
pub const CYCLE_LEN: u8 = 60;

/// A stem-branch pair, rendered as two hanja (e.g. `甲子`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pillar {
    stem: Stem,
    branch: Branch,
}

impl Pillar {
    /// Pair a stem and branch, rejecting combinations outside the 60-cycle.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self, BaseError> {
        if stem.index() % 2 != branch.index() % 2 {
            return Err(BaseError::ParityMismatch { stem, branch });
        }
        Ok(Self { stem, branch })
    }

    /// Pillar for a pair already known to share parity.
    pub(crate) fn from_parts(stem: Stem, branch: Branch) -> Self {
        debug_assert_eq!(stem.index() % 2, branch.index() % 2, "{stem:?}/{branch:?}");
        Self { stem, branch }
    }

    /// Pillar at a cycle position; any integer is reduced modulo 60.
    pub fn from_cycle_index(index: i64) -> Self {
        let i = index.rem_euclid(i64::from(CYCLE_LEN));
        Self {
            stem: Stem::from_index(i),
            branch: Branch::from_index(i),
        }
    }

    /// 0-based cycle position (甲子=0 .. 癸亥=59).
    pub fn cycle_index(self) -> u8 {
        let s = i16::from(self.stem.index());
        let b = i16::from(self.branch.index());
        (6 * s - 5 * b).rem_euclid(i16::from(CYCLE_LEN)) as u8
    }

    /// Advance `n` positions around the 60-cycle.
    pub fn advance(self, n: i64) -> Self {
        Self::from_cycle_index(i64::from(self.cycle_index()) + n)
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// Element classes of the stem and the branch.
    pub fn elements(self) -> [Element; 2] {
        [self.stem.element(), self.branch.element()]
    }

    /// Hangul rendering (e.g. `갑자`).
    pub fn hangul(self) -> String {
        [self.stem.hangul(), self.branch.hangul()].iter().collect()
    }

    /// Romanized rendering (e.g. `Gap-Ja`).
    pub fn romanized(self) -> String {
        format!("{}-{}", self.stem.name(), self.branch.name())
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.hanja(), self.branch.hanja())
    }
}

impl FromStr for Pillar {
    type Err = BaseError;

    /// Parse a two-glyph pillar in hanja (`甲子`) or hangul (`갑자`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(sc), Some(bc), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BaseError::BadPillarLength(s.to_string()));
        };
        let stem = Stem::from_char(sc).ok_or(BaseError::UnknownSymbol(sc))?;
        let branch = Branch::from_char(bc).ok_or(BaseError::UnknownSymbol(bc))?;
        Self::new(stem, branch)
    }
}

impl TryFrom<String> for Pillar {
    type Error = BaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pillar> for String {
    fn from(value: Pillar) -> Self {
        value.to_string()
    }
}
