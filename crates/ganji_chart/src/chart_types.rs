//! Request and result types for chart computation.

use std::fmt::{Display, Formatter};

use ganji_base::{ElementCounts, HourConvention, HourKind, Pillar, TimeSlot, element_counts};
use ganji_table::LunarDate;
use ganji_time::{CivilDate, ClockTime};
use serde::Serialize;

/// Calendar the input date is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "calendar", content = "date", rename_all = "snake_case")]
pub enum CalendarInput {
    Solar(CivilDate),
    Lunar(LunarDate),
}

impl CalendarInput {
    pub const fn is_lunar(&self) -> bool {
        matches!(self, Self::Lunar(_))
    }
}

/// One chart query: date, raw standard-time clock, and hour convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChartRequest {
    pub date: CalendarInput,
    pub clock: ClockTime,
    pub convention: HourConvention,
}

impl ChartRequest {
    /// Solar date with the default hour convention.
    pub fn solar(date: CivilDate, clock: ClockTime) -> Self {
        Self {
            date: CalendarInput::Solar(date),
            clock,
            convention: HourConvention::default(),
        }
    }

    /// Lunar date with the default hour convention.
    pub fn lunar(date: LunarDate, clock: ClockTime) -> Self {
        Self {
            date: CalendarInput::Lunar(date),
            clock,
            convention: HourConvention::default(),
        }
    }

    /// Solar date at a named slot's representative time.
    pub fn from_slot(date: CivilDate, slot: TimeSlot) -> Self {
        Self::solar(date, slot.representative())
    }

    pub fn with_convention(mut self, convention: HourConvention) -> Self {
        self.convention = convention;
        self
    }
}

/// Where a pillar value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarSource {
    /// Fixed-boundary rule engine.
    Rules,
    /// Precomputed reference table.
    Table,
    /// Pillar strings supplied by an external data source.
    External,
}

impl PillarSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rules => "rule engine",
            Self::Table => "reference table",
            Self::External => "external source",
        }
    }
}

impl Display for PillarSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How year/month were chosen when the clock precedes the day's solar term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TermAdjustment {
    /// Copied from the previous day's table row.
    PreviousRow,
    /// Previous day not in the table: month stepped back one from this
    /// day's row, and the year too when the row opens the 寅 month.
    SteppedBack,
}

impl TermAdjustment {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PreviousRow => "previous day's year/month",
            Self::SteppedBack => "year/month stepped back from this day's row",
        }
    }
}

/// How the hour pillar was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourDetail {
    pub kind: HourKind,
    /// Days added to the civil date before taking the day pillar (0 or −1).
    pub day_correction: i8,
    /// Raw clock after the standard-time correction.
    pub adjusted: ClockTime,
    /// Civil date whose day pillar the chart carries.
    pub day_date: CivilDate,
    /// Source of that day pillar.
    pub day_source: PillarSource,
}

impl HourDetail {
    pub fn is_late_evening(&self) -> bool {
        self.kind == HourKind::LateRat
    }
}

/// A computed four-pillar chart. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    year: Pillar,
    month: Pillar,
    day: Pillar,
    hour: Pillar,
    solar_date: CivilDate,
    clock: ClockTime,
    source: PillarSource,
    term_adjustment: Option<TermAdjustment>,
    hour_detail: HourDetail,
    annotation: String,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ChartParts {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    pub solar_date: CivilDate,
    pub clock: ClockTime,
    pub source: PillarSource,
    pub term_adjustment: Option<TermAdjustment>,
    pub hour_detail: HourDetail,
    pub correction_minutes: u16,
}

impl Chart {
    pub(crate) fn assemble(parts: ChartParts) -> Self {
        let annotation = annotate(&parts);
        Self {
            year: parts.year,
            month: parts.month,
            day: parts.day,
            hour: parts.hour,
            solar_date: parts.solar_date,
            clock: parts.clock,
            source: parts.source,
            term_adjustment: parts.term_adjustment,
            hour_detail: parts.hour_detail,
            annotation,
        }
    }

    pub fn year(&self) -> Pillar {
        self.year
    }

    pub fn month(&self) -> Pillar {
        self.month
    }

    pub fn day(&self) -> Pillar {
        self.day
    }

    pub fn hour(&self) -> Pillar {
        self.hour
    }

    /// Pillars in year, month, day, hour order.
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// Solar date the chart was computed for (after any lunar resolution).
    pub fn solar_date(&self) -> CivilDate {
        self.solar_date
    }

    /// Raw clock time of the request.
    pub fn clock(&self) -> ClockTime {
        self.clock
    }

    /// Source of the year and month pillars.
    pub fn source(&self) -> PillarSource {
        self.source
    }

    /// Whether the time precedes the day's solar term, so the year/month
    /// pillars are those of the outgoing month.
    pub fn term_adjusted(&self) -> bool {
        self.term_adjustment.is_some()
    }

    pub fn term_adjustment(&self) -> Option<TermAdjustment> {
        self.term_adjustment
    }

    pub fn hour_detail(&self) -> &HourDetail {
        &self.hour_detail
    }

    /// Which rules fired and what corrections were applied.
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    pub fn element_counts(&self) -> ElementCounts {
        element_counts(self.pillars())
    }
}

impl Display for Chart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

fn annotate(parts: &ChartParts) -> String {
    let d = &parts.hour_detail;
    let mut note = format!(
        "{}, standard-time correction -{} min, day correction {:+} day, pillars from {}",
        d.kind, parts.correction_minutes, d.day_correction, parts.source
    );
    if let Some(adjustment) = parts.term_adjustment {
        note.push_str(", before solar term: ");
        note.push_str(adjustment.label());
    }
    if d.day_source != parts.source {
        note.push_str(&format!(", day pillar from {}", d.day_source));
    }
    note
}
