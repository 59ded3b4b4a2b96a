//! Immutable, date-indexed reference table.

use std::collections::HashMap;
use std::path::Path;

use ganji_time::CivilDate;

use crate::error::TableError;
use crate::parse::{TableFormat, parse_rows};
use crate::row::{LunarDate, TableRow};

/// Precomputed day-by-day pillars, sorted by solar date.
///
/// Built once and never mutated; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    rows: Vec<TableRow>,
    lunar_index: HashMap<LunarDate, CivilDate>,
}

impl ReferenceTable {
    /// Build from rows in any order.
    ///
    /// Rejects an empty set and duplicate solar or lunar keys.
    pub fn from_rows(mut rows: Vec<TableRow>) -> Result<Self, TableError> {
        if rows.is_empty() {
            return Err(TableError::Empty);
        }
        rows.sort_by_key(|r| r.solar);
        if let Some(w) = rows.windows(2).find(|w| w[0].solar == w[1].solar) {
            return Err(TableError::Duplicate(w[1].solar));
        }

        let mut lunar_index = HashMap::new();
        for row in &rows {
            if let Some(lunar) = row.lunar {
                if lunar_index.insert(lunar, row.solar).is_some() {
                    return Err(TableError::DuplicateLunar(lunar));
                }
            }
        }

        Ok(Self { rows, lunar_index })
    }

    /// Parse a table from string content.
    pub fn parse(content: &str, format: TableFormat) -> Result<Self, TableError> {
        Self::from_rows(parse_rows(content, format)?)
    }

    /// Load a table file; the format follows the file extension.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, TableFormat::from_path(path))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty (never true for a constructed table).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last solar dates present.
    pub fn range(&self) -> (CivilDate, CivilDate) {
        (self.rows[0].solar, self.rows[self.rows.len() - 1].solar)
    }

    /// Whether `date` has a row.
    pub fn covers(&self, date: CivilDate) -> bool {
        self.position(date).is_some()
    }

    /// Row for `date`, if present.
    pub fn row(&self, date: CivilDate) -> Option<&TableRow> {
        self.position(date).map(|i| &self.rows[i])
    }

    /// Row for `date`, treating absence as an error.
    pub fn lookup(&self, date: CivilDate) -> Result<&TableRow, TableError> {
        self.row(date).ok_or(TableError::LookupMiss(date))
    }

    /// Row of the calendar day before `date`, if the table has it.
    pub fn previous_row(&self, date: CivilDate) -> Option<&TableRow> {
        let i = self.position(date)?;
        let prev = self.rows.get(i.checked_sub(1)?)?;
        let expected = date.pred().ok()?;
        (prev.solar == expected).then_some(prev)
    }

    /// Solar date of a lunar date.
    pub fn solar_for_lunar(&self, lunar: LunarDate) -> Result<CivilDate, TableError> {
        self.lunar_index
            .get(&lunar)
            .copied()
            .ok_or(TableError::LunarLookupMiss(lunar))
    }

    /// All rows in solar-date order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    fn position(&self, date: CivilDate) -> Option<usize> {
        self.rows.binary_search_by_key(&date, |r| r.solar).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
1971-07-08, 1971-05-16, 辛亥, 乙未, 壬辰
1971-07-07, 1971-05-15, 辛亥, 乙未, 辛卯, 19:51
1971-07-06, 1971-05-14, 辛亥, 甲午, 庚寅
1971-07-10, 1971-05-18, 辛亥, 乙未, 甲午
";

    fn d(y: i32, m: u32, day: u32) -> CivilDate {
        CivilDate::new(y, m, day).unwrap()
    }

    #[test]
    fn sorted_and_ranged() {
        let t = ReferenceTable::parse(SAMPLE, TableFormat::Text).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.range(), (d(1971, 7, 6), d(1971, 7, 10)));
        assert!(t.covers(d(1971, 7, 7)));
        assert!(!t.covers(d(1971, 7, 9)));
    }

    #[test]
    fn lookup_miss() {
        let t = ReferenceTable::parse(SAMPLE, TableFormat::Text).unwrap();
        assert_eq!(
            t.lookup(d(1971, 7, 9)).unwrap_err(),
            TableError::LookupMiss(d(1971, 7, 9))
        );
    }

    #[test]
    fn previous_row_requires_adjacent_day() {
        let t = ReferenceTable::parse(SAMPLE, TableFormat::Text).unwrap();
        assert_eq!(t.previous_row(d(1971, 7, 7)).unwrap().solar, d(1971, 7, 6));
        // 07-09 is missing, so 07-10 has no previous row
        assert!(t.previous_row(d(1971, 7, 10)).is_none());
        assert!(t.previous_row(d(1971, 7, 6)).is_none());
    }

    #[test]
    fn lunar_reverse_lookup() {
        let t = ReferenceTable::parse(SAMPLE, TableFormat::Text).unwrap();
        assert_eq!(
            t.solar_for_lunar(LunarDate::new(1971, 5, 15, false)).unwrap(),
            d(1971, 7, 7)
        );
        assert!(matches!(
            t.solar_for_lunar(LunarDate::new(1971, 5, 15, true)),
            Err(TableError::LunarLookupMiss(_))
        ));
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        let dup = "1971-07-07, -, 辛亥, 乙未, 辛卯\n1971-07-07, -, 辛亥, 乙未, 辛卯\n";
        assert_eq!(
            ReferenceTable::parse(dup, TableFormat::Text).unwrap_err(),
            TableError::Duplicate(d(1971, 7, 7))
        );
        let dup_lunar = "1971-07-07, 1971-05-15, 辛亥, 乙未, 辛卯\n1971-07-08, 1971-05-15, 辛亥, 乙未, 壬辰\n";
        assert!(matches!(
            ReferenceTable::parse(dup_lunar, TableFormat::Text),
            Err(TableError::DuplicateLunar(_))
        ));
        assert_eq!(
            ReferenceTable::parse("# nothing\n", TableFormat::Text).unwrap_err(),
            TableError::Empty
        );
    }
}
