//! Chart assembly: rule engine with optional reference-table overlay.
//!
//! Year and month pillars come from the table when it covers the date,
//! shifted to the previous row when the clock precedes that day's solar
//! term. The day pillar is always that of the corrected date (after the 子
//! midnight split) and is taken from the table when the table covers that
//! date. Everything outside table coverage is computed by the rules in
//! `ganji_base`.

use std::sync::Arc;

use ganji_base::{
    Branch, ElementCounts, Pillar, day_pillar, hour_pillar, month_pillar, year_pillar,
};
use ganji_table::{ReferenceTable, TableRow, TableService};
use ganji_time::CivilDate;
use tracing::debug;

use crate::chart_types::{
    CalendarInput, Chart, ChartParts, ChartRequest, HourDetail, PillarSource, TermAdjustment,
};
use crate::collab::{LunarResolver, PillarTable};
use crate::error::ChartError;

/// Compute a chart from the rules alone.
///
/// A lunar request needs `resolver`; without one the request is rejected
/// rather than approximated.
pub fn chart(
    request: &ChartRequest,
    resolver: Option<&dyn LunarResolver>,
) -> Result<Chart, ChartError> {
    compute(request, None, resolver)
}

/// Compute a chart, preferring `table` wherever it covers the dates involved.
///
/// The table also resolves lunar requests.
pub fn chart_with_table(request: &ChartRequest, table: &ReferenceTable) -> Result<Chart, ChartError> {
    compute(request, Some(table), Some(table))
}

/// Element tally over a chart's eight symbols.
pub fn element_counts(chart: &Chart) -> ElementCounts {
    chart.element_counts()
}

fn compute(
    request: &ChartRequest,
    table: Option<&dyn PillarTable>,
    resolver: Option<&dyn LunarResolver>,
) -> Result<Chart, ChartError> {
    let convention = request.convention;
    if !convention.is_valid() {
        return Err(ChartError::InvalidConvention(convention.correction_minutes));
    }
    let date = resolve_date(request.date, resolver)?;

    let covered = table.and_then(|t| t.row(date).map(|row| (t, row)));
    let (year, month, source, term_adjustment) = match covered {
        Some((t, row)) => match row.term_start {
            Some(start) if request.clock < start => {
                debug!(%date, clock = %request.clock, term_start = %start, "before solar term");
                let (year, month, adjustment) = pre_term_year_month(t, &row);
                (year, month, PillarSource::Table, Some(adjustment))
            }
            _ => (row.year, row.month, PillarSource::Table, None),
        },
        None => {
            if table.is_some() {
                debug!(%date, "date outside reference table, using rule engine");
            }
            let year = year_pillar(date);
            (year, month_pillar(date, year.stem()), PillarSource::Rules, None)
        }
    };

    let mut day_source = PillarSource::Rules;
    let hour = hour_pillar(date, request.clock, &convention, |day_date| {
        match table.and_then(|t| t.row(day_date)) {
            Some(row) => {
                day_source = PillarSource::Table;
                row.day
            }
            None => {
                if table.is_some() {
                    debug!(date = %day_date, "day outside reference table, using rule engine");
                }
                day_pillar(day_date)
            }
        }
    })?;

    Ok(Chart::assemble(ChartParts {
        year,
        month,
        day: hour.day_pillar,
        hour: hour.pillar,
        solar_date: date,
        clock: request.clock,
        source,
        term_adjustment,
        hour_detail: HourDetail {
            kind: hour.branch.kind,
            day_correction: hour.day_correction(),
            adjusted: hour.branch.adjusted,
            day_date: hour.day_date,
            day_source,
        },
        correction_minutes: convention.correction_minutes,
    }))
}

fn resolve_date(
    input: CalendarInput,
    resolver: Option<&dyn LunarResolver>,
) -> Result<CivilDate, ChartError> {
    match input {
        CalendarInput::Solar(date) => Ok(date),
        CalendarInput::Lunar(lunar) => {
            let resolver = resolver.ok_or(ChartError::UnsupportedInput(
                "lunar date requires a lunar-to-solar resolver",
            ))?;
            let solar = resolver.to_solar(lunar)?;
            debug!(%lunar, %solar, "resolved lunar date");
            Ok(solar)
        }
    }
}

/// Year and month pillars of the outgoing month for a row whose solar term
/// has not yet begun.
///
/// The row opens a new month, so without a previous row the outgoing month
/// is one step back in the cycle, and a 寅 row also opens the year.
fn pre_term_year_month(
    table: &dyn PillarTable,
    row: &TableRow,
) -> (Pillar, Pillar, TermAdjustment) {
    if let Some(prev) = table.previous_row(row.solar) {
        return (prev.year, prev.month, TermAdjustment::PreviousRow);
    }
    debug!(date = %row.solar, "previous day outside reference table, stepping back from this row");
    let year = if row.month.branch() == Branch::In {
        row.year.advance(-1)
    } else {
        row.year
    };
    (year, row.month.advance(-1), TermAdjustment::SteppedBack)
}

/// Chart front-end holding an optional shared reference table.
#[derive(Debug, Clone, Default)]
pub struct ChartEngine {
    table: Option<Arc<ReferenceTable>>,
}

impl ChartEngine {
    /// Engine without a table; lunar requests are rejected.
    pub fn rules_only() -> Self {
        Self::default()
    }

    pub fn with_table(table: Arc<ReferenceTable>) -> Self {
        Self { table: Some(table) }
    }

    /// Engine over the snapshot held by `service`, loading it if needed.
    pub fn from_service(service: &TableService) -> Result<Self, ChartError> {
        Ok(Self::with_table(service.load()?))
    }

    pub fn table(&self) -> Option<&ReferenceTable> {
        self.table.as_deref()
    }

    pub fn chart(&self, request: &ChartRequest) -> Result<Chart, ChartError> {
        match self.table.as_deref() {
            Some(table) => chart_with_table(request, table),
            None => chart(request, None),
        }
    }

    /// Evaluate several requests. Results are in input order.
    pub fn chart_batch(&self, requests: &[ChartRequest]) -> Vec<Result<Chart, ChartError>> {
        requests.iter().map(|r| self.chart(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use ganji_base::{HourConvention, HourKind, RatSplit, TimeSlot};
    use ganji_table::{LunarDate, TableRow};
    use ganji_time::ClockTime;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CivilDate {
        CivilDate::new(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    fn p(s: &str) -> Pillar {
        s.parse().unwrap()
    }

    #[test]
    fn rules_chart_for_reference_evening() {
        let c = chart(&ChartRequest::solar(d(1971, 7, 7), t(22, 30)), None).unwrap();
        assert_eq!(c.to_string(), "辛亥 乙未 辛卯 己亥");
        assert_eq!(c.source(), PillarSource::Rules);
        assert!(!c.term_adjusted());
        assert_eq!(c.hour_detail().kind, HourKind::Regular);
        assert_eq!(c.hour_detail().day_correction, 0);
    }

    #[test]
    fn late_rat_uses_previous_day() {
        let c = chart(&ChartRequest::solar(d(1971, 7, 7), t(23, 40)), None).unwrap();
        assert_eq!(c.day(), p("庚寅"));
        assert_eq!(c.hour(), p("丙子"));
        assert_eq!(c.hour_detail().day_date, d(1971, 7, 6));
        assert!(c.hour_detail().is_late_evening());
        assert!(c.annotation().contains("day correction -1 day"));
    }

    #[test]
    fn early_rat_keeps_day() {
        let c = chart(&ChartRequest::solar(d(1971, 7, 7), t(0, 40)), None).unwrap();
        assert_eq!(c.day(), p("辛卯"));
        assert_eq!(c.hour(), p("戊子"));
        assert_eq!(c.hour_detail().kind, HourKind::EarlyRat);
        assert_eq!(c.hour_detail().day_correction, 0);
    }

    #[test]
    fn raw_midnight_split_moves_twenty_past_midnight() {
        let conv = HourConvention {
            rat_split: RatSplit::RawMidnight,
            ..HourConvention::default()
        };
        let req = ChartRequest::solar(d(1971, 7, 7), t(0, 20)).with_convention(conv);
        let c = chart(&req, None).unwrap();
        assert_eq!(c.hour_detail().day_correction, 0);
        let default = chart(&ChartRequest::solar(d(1971, 7, 7), t(0, 20)), None).unwrap();
        assert_eq!(default.hour_detail().day_correction, -1);
    }

    #[test]
    fn slot_request_matches_representative_time() {
        let slot = TimeSlot::from_label("21:30–23:30").unwrap();
        let a = chart(&ChartRequest::from_slot(d(1971, 7, 7), slot), None).unwrap();
        let b = chart(&ChartRequest::solar(d(1971, 7, 7), slot.representative()), None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_correction_rejected() {
        let conv = HourConvention {
            correction_minutes: 90,
            ..HourConvention::default()
        };
        let req = ChartRequest::solar(d(2000, 1, 1), t(12, 0)).with_convention(conv);
        assert_eq!(chart(&req, None), Err(ChartError::InvalidConvention(90)));
    }

    #[test]
    fn lunar_without_resolver_unsupported() {
        let req = ChartRequest::lunar(LunarDate::new(1971, 5, 15, false), t(12, 0));
        assert!(matches!(
            chart(&req, None),
            Err(ChartError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn engine_without_table_matches_free_function() {
        let req = ChartRequest::solar(d(2024, 2, 4), t(9, 0));
        let engine = ChartEngine::rules_only();
        assert!(engine.table().is_none());
        assert_eq!(engine.chart(&req), chart(&req, None));
    }

    #[test]
    fn engine_batch_keeps_order() {
        let table = ReferenceTable::from_rows(vec![TableRow {
            solar: d(2024, 2, 4),
            lunar: None,
            year: p("甲辰"),
            month: p("丙寅"),
            day: p("丙申"),
            term_start: None,
        }])
        .unwrap();
        let engine = ChartEngine::with_table(Arc::new(table));
        let reqs = [
            ChartRequest::solar(d(2024, 2, 4), t(9, 0)),
            ChartRequest::lunar(LunarDate::new(2024, 1, 1, false), t(9, 0)),
        ];
        let out = engine.chart_batch(&reqs);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_ref().unwrap().source(), PillarSource::Table);
        assert!(matches!(out[1], Err(ChartError::LookupMiss(_))));
    }
}
