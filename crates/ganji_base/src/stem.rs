//! The ten heavenly stems (천간).
//!
//! Ordinal position drives every offset computation in the pillar rules, so
//! the declaration order below must never change.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// The ten stems, 甲 (index 0) through 癸 (index 9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

/// All 10 stems in cycle order.
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

const HANJA: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];
const HANGUL: [char; 10] = ['갑', '을', '병', '정', '무', '기', '경', '신', '임', '계'];
const NAMES: [&str; 10] = [
    "Gap", "Eul", "Byeong", "Jeong", "Mu", "Gi", "Gyeong", "Sin", "Im", "Gye",
];

// Stems pair off by element: 甲乙 wood, 丙丁 fire, 戊己 earth, 庚辛 metal, 壬癸 water.
const ELEMENTS: [Element; 10] = [
    Element::Wood,
    Element::Wood,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Water,
    Element::Water,
];

impl Stem {
    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at a cyclic position; any integer is reduced modulo 10.
    pub fn from_index(index: i64) -> Self {
        ALL_STEMS[index.rem_euclid(10) as usize]
    }

    /// Advance `n` positions around the 10-cycle.
    pub fn advance(self, n: i64) -> Self {
        Self::from_index(i64::from(self.index()) + n)
    }

    pub fn element(self) -> Element {
        ELEMENTS[self.index() as usize]
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

    /// Look up a stem by its hanja or hangul glyph.
    pub fn from_char(c: char) -> Option<Self> {
        HANJA
            .iter()
            .position(|&h| h == c)
            .or_else(|| HANGUL.iter().position(|&h| h == c))
            .map(|i| ALL_STEMS[i])
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hanja())
    }
}
