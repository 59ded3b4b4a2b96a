//! The twelve earthly branches (지지).
//!
//! 子 (rat) is the midnight branch: its two-hour span straddles the civil
//! day boundary, which is what makes the hour pillar day-dependent.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// The twelve branches, 子 (index 0) through 亥 (index 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Branch {
    Ja,
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

/// All 12 branches in cycle order.
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

/// The branch whose hour spans midnight.
pub const MIDNIGHT_BRANCH: Branch = Branch::Ja;

const HANJA: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];
const HANGUL: [char; 12] = [
    '자', '축', '인', '묘', '진', '사', '오', '미', '신', '유', '술', '해',
];
const NAMES: [&str; 12] = [
    "Ja", "Chuk", "In", "Myo", "Jin", "Sa", "O", "Mi", "Sin", "Yu", "Sul", "Hae",
];
const ANIMALS: [&str; 12] = [
    "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey", "Rooster",
    "Dog", "Pig",
];
const ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

impl Branch {
    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at a cyclic position; any integer is reduced modulo 12.
    pub fn from_index(index: i64) -> Self {
        ALL_BRANCHES[index.rem_euclid(12) as usize]
    }

    /// Advance `n` positions around the 12-cycle.
    pub fn advance(self, n: i64) -> Self {
        Self::from_index(i64::from(self.index()) + n)
    }

    /// Position in the month rotation that starts at 寅 (寅=0 .. 丑=11).
    pub const fn month_ordinal(self) -> u8 {
        (self.index() + 10) % 12
    }

    pub fn element(self) -> Element {
        ELEMENTS[self.index() as usize]
    }

    pub fn is_midnight(self) -> bool {
        self == MIDNIGHT_BRANCH
    }

    pub fn hanja(self) -> char {
        HANJA[self.index() as usize]
    }

    pub fn hangul(self) -> char {
        HANGUL[self.index() as usize]
    }

    /// Revised-romanization name.
    pub fn name(self) -> &'static str {
        NAMES[self.index() as usize]
    }

    /// Zodiac animal.
    pub fn animal(self) -> &'static str {
        ANIMALS[self.index() as usize]
    }

    /// Look up a branch by its hanja or hangul glyph.
    pub fn from_char(c: char) -> Option<Self> {
        HANJA
            .iter()
            .position(|&h| h == c)
            .or_else(|| HANGUL.iter().position(|&h| h == c))
            .map(|i| ALL_BRANCHES[i])
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hanja())
    }
}
