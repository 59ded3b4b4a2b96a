//! Intake of pillar strings fetched from a live data source.
//!
//! The fetch itself happens elsewhere; this module only validates the four
//! strings and wraps them in a [`Chart`] with the same hour details the rule
//! engine would report.

use ganji_base::{Branch, HourKind, Pillar, hour_branch};
use serde::{Deserialize, Serialize};

use crate::chart_types::{CalendarInput, Chart, ChartParts, ChartRequest, HourDetail, PillarSource};
use crate::error::ChartError;

/// Four pillar strings as returned by an external source (hanja or hangul).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPillars {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    /// Late-evening flag reported by the source, if it reports one.
    #[serde(default)]
    pub late_evening: Option<bool>,
}

fn parse_field(field: &'static str, value: &str) -> Result<Pillar, ChartError> {
    value
        .parse()
        .map_err(|reason| ChartError::MalformedExternalResponse {
            field,
            value: value.to_string(),
            reason,
        })
}

/// Build a chart from pre-fetched pillars for a solar request.
///
/// The pillars are taken as given. Hour details are derived from the
/// request's clock and convention, with the source's late-evening flag
/// overriding the split side when the hour is 子.
pub fn chart_from_external(
    request: &ChartRequest,
    pillars: &ExternalPillars,
) -> Result<Chart, ChartError> {
    let CalendarInput::Solar(date) = request.date else {
        return Err(ChartError::UnsupportedInput(
            "external pillars are keyed by solar date",
        ));
    };
    let convention = request.convention;
    if !convention.is_valid() {
        return Err(ChartError::InvalidConvention(convention.correction_minutes));
    }

    let year = parse_field("year", &pillars.year)?;
    let month = parse_field("month", &pillars.month)?;
    let day = parse_field("day", &pillars.day)?;
    let hour = parse_field("hour", &pillars.hour)?;

    let computed = hour_branch(request.clock, &convention);
    let kind = match (hour.branch(), pillars.late_evening) {
        (Branch::Ja, Some(true)) => HourKind::LateRat,
        (Branch::Ja, Some(false)) => HourKind::EarlyRat,
        (Branch::Ja, None) if computed.branch == Branch::Ja => computed.kind,
        (Branch::Ja, None) => HourKind::EarlyRat,
        _ => HourKind::Regular,
    };
    let day_correction: i8 = if kind == HourKind::LateRat { -1 } else { 0 };

    Ok(Chart::assemble(ChartParts {
        year,
        month,
        day,
        hour,
        solar_date: date,
        clock: request.clock,
        source: PillarSource::External,
        term_adjustment: None,
        hour_detail: HourDetail {
            kind,
            day_correction,
            adjusted: computed.adjusted,
            day_date: date.add_days(i64::from(day_correction))?,
            day_source: PillarSource::External,
        },
        correction_minutes: convention.correction_minutes,
    }))
}

#[cfg(test)]
mod tests {
    use ganji_base::BaseError;
    use ganji_time::{CivilDate, ClockTime};

    use super::*;

    fn request(h: u32, m: u32) -> ChartRequest {
        ChartRequest::solar(
            CivilDate::new(1971, 7, 7).unwrap(),
            ClockTime::new(h, m).unwrap(),
        )
    }

    fn pillars(hour: &str) -> ExternalPillars {
        ExternalPillars {
            year: "辛亥".into(),
            month: "을미".into(),
            day: "辛卯".into(),
            hour: hour.into(),
            late_evening: None,
        }
    }

    #[test]
    fn accepts_hanja_and_hangul() {
        let c = chart_from_external(&request(22, 30), &pillars("기해")).unwrap();
        assert_eq!(c.to_string(), "辛亥 乙未 辛卯 己亥");
        assert_eq!(c.source(), PillarSource::External);
        assert_eq!(c.element_counts().total(), 8);
    }

    #[test]
    fn bad_string_names_the_field() {
        let err = chart_from_external(&request(22, 30), &pillars("己")).unwrap_err();
        assert_eq!(
            err,
            ChartError::MalformedExternalResponse {
                field: "hour",
                value: "己".into(),
                reason: BaseError::BadPillarLength("己".into()),
            }
        );
    }

    #[test]
    fn parity_mismatch_rejected() {
        let mut p = pillars("己亥");
        p.day = "甲丑".into();
        assert!(matches!(
            chart_from_external(&request(22, 30), &p),
            Err(ChartError::MalformedExternalResponse { field: "day", .. })
        ));
    }

    #[test]
    fn source_flag_overrides_split_side() {
        let mut p = pillars("丙子");
        p.late_evening = Some(true);
        let c = chart_from_external(&request(0, 50), &p).unwrap();
        assert!(c.hour_detail().is_late_evening());
        assert_eq!(c.hour_detail().day_correction, -1);

        p.late_evening = None;
        let c = chart_from_external(&request(0, 50), &p).unwrap();
        assert_eq!(c.hour_detail().kind, HourKind::EarlyRat);
    }

    #[test]
    fn deserializes_without_flag() {
        let json = r#"{"year":"辛亥","month":"乙未","day":"辛卯","hour":"己亥"}"#;
        let p: ExternalPillars = serde_json::from_str(json).unwrap();
        assert_eq!(p.late_evening, None);
    }
}
