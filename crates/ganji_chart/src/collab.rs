//! Collaborator interfaces the chart engine consumes.
//!
//! Both are synchronous lookups over data the caller already holds; the
//! engine never performs I/O through them. [`ReferenceTable`] implements
//! both.

use ganji_table::{LunarDate, ReferenceTable, TableRow};
use ganji_time::CivilDate;

use crate::error::ChartError;

/// Date → precomputed pillars.
pub trait PillarTable {
    /// Row for `date`, or `None` when the date is outside the table.
    fn row(&self, date: CivilDate) -> Option<TableRow>;

    /// Row of the calendar day before `date`, if present.
    fn previous_row(&self, date: CivilDate) -> Option<TableRow> {
        self.row(date.pred().ok()?)
    }
}

/// Lunar → solar date resolution.
pub trait LunarResolver {
    fn to_solar(&self, lunar: LunarDate) -> Result<CivilDate, ChartError>;
}

impl PillarTable for ReferenceTable {
    fn row(&self, date: CivilDate) -> Option<TableRow> {
        ReferenceTable::row(self, date).copied()
    }

    fn previous_row(&self, date: CivilDate) -> Option<TableRow> {
        ReferenceTable::previous_row(self, date).copied()
    }
}

impl LunarResolver for ReferenceTable {
    fn to_solar(&self, lunar: LunarDate) -> Result<CivilDate, ChartError> {
        Ok(self.solar_for_lunar(lunar)?)
    }
}
