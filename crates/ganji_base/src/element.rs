//! The five elements (오행) used to classify stems and branches.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The five element classes, in the conventional generating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in order (index 0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

const HANJA: [&str; 5] = ["木", "火", "土", "金", "水"];
const HANGUL: [&str; 5] = ["목", "화", "토", "금", "수"];

impl Element {
    /// 0-based index (Wood=0 .. Water=4).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    pub fn hanja(self) -> &'static str {
        HANJA[self.index() as usize]
    }

    pub fn hangul(self) -> &'static str {
        HANGUL[self.index() as usize]
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, e) in ALL_ELEMENTS.iter().enumerate() {
            assert_eq!(e.index() as usize, i);
        }
    }

    #[test]
    fn glyphs() {
        assert_eq!(Element::Metal.hanja(), "金");
        assert_eq!(Element::Water.hangul(), "수");
    }
}
