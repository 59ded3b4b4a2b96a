//! Five-element tally (오행 분포) over the eight symbols of a chart.

use std::fmt::{Display, Formatter};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::element::{ALL_ELEMENTS, Element};
use crate::pillar::Pillar;

/// Count of symbols per element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ElementCounts {
    counts: [u8; 5],
}

impl ElementCounts {
    /// Tally the stem and branch of every pillar.
    pub fn from_pillars(pillars: &[Pillar]) -> Self {
        let mut out = Self::default();
        for p in pillars {
            for e in p.elements() {
                out.counts[e.index() as usize] += 1;
            }
        }
        out
    }

    pub fn get(&self, element: Element) -> u8 {
        self.counts[element.index() as usize]
    }

    /// Sum over all elements (8 for a four-pillar chart).
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }

    /// `(element, count)` pairs in element order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, u8)> + '_ {
        ALL_ELEMENTS.iter().map(|&e| (e, self.get(e)))
    }

    /// Most frequent element; ties resolve to the earlier element.
    pub fn dominant(&self) -> Element {
        let mut best = Element::Wood;
        for (e, c) in self.iter() {
            if c > self.get(best) {
                best = e;
            }
        }
        best
    }

    /// Elements with no symbol at all.
    pub fn missing(&self) -> Vec<Element> {
        self.iter().filter(|&(_, c)| c == 0).map(|(e, _)| e).collect()
    }
}

/// Tally the four pillars of a chart.
pub fn element_counts(pillars: [Pillar; 4]) -> ElementCounts {
    ElementCounts::from_pillars(&pillars)
}

impl Display for ElementCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (e, c) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}{}", e.hanja(), c)?;
        }
        Ok(())
    }
}

impl Serialize for ElementCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ALL_ELEMENTS.len()))?;
        for (e, c) in self.iter() {
            map.serialize_entry(e.name(), &c)?;
        }
        map.end()
    }
}
