//! Subcommand execution. Each command renders its output to a string.

use std::path::PathBuf;

use ganji_base::{
    ElementCounts, Pillar, TimeSlot, active_term, day_pillar, element_counts, hour_pillar,
    month_pillar, year_pillar,
};
use ganji_chart::{Chart, ChartEngine, ChartRequest};
use ganji_config::GanjiConfig;
use ganji_table::{FileSource, LunarDate, TableService};
use ganji_time::{CivilDate, ClockTime};
use tracing::info;

use crate::error::CliError;
use crate::{Commands, ConventionArgs};

pub(crate) fn run(command: Commands, config: &GanjiConfig) -> Result<String, CliError> {
    match command {
        Commands::Chart {
            date,
            time,
            slot,
            lunar,
            leap,
            table,
            json,
            convention,
        } => {
            let clock = resolve_clock(time, slot.as_deref())?;
            let request = build_request(&date, clock, lunar, leap)?
                .with_convention(convention.apply(config.hour.convention()));
            let engine = engine_for(table, config)?;
            let chart = engine.chart(&request)?;
            if json {
                render_chart_json(&chart)
            } else {
                Ok(render_chart(&chart))
            }
        }
        Commands::Year { date } => {
            let pillar = year_pillar(date);
            Ok(format!("{}, year of the {}", describe(pillar), pillar.branch().animal()))
        }
        Commands::Month { date } => {
            let pillar = month_pillar(date, year_pillar(date).stem());
            let term = active_term(date);
            Ok(format!(
                "{} (term {} from {})",
                describe(pillar),
                term.boundary.name,
                term.start_date()?
            ))
        }
        Commands::Day { date } => Ok(describe(day_pillar(date))),
        Commands::Hour {
            date,
            time,
            convention,
        } => render_hour(date, time, convention, config),
        Commands::Elements { pillars, json } => {
            let counts = tally(&pillars)?;
            if json {
                Ok(serde_json::to_string_pretty(&counts)?)
            } else {
                Ok(format!("{counts} (dominant: {})", counts.dominant().hanja()))
            }
        }
        Commands::Slots => Ok(render_slots()),
    }
}

fn resolve_clock(time: Option<ClockTime>, slot: Option<&str>) -> Result<ClockTime, CliError> {
    match (time, slot) {
        (Some(time), _) => Ok(time),
        (None, Some(label)) => TimeSlot::from_label(label)
            .map(TimeSlot::representative)
            .ok_or_else(|| {
                CliError::Usage(format!(
                    "unknown time slot {label:?}; run `ganji slots` for the list"
                ))
            }),
        (None, None) => Err(CliError::Usage("either --time or --slot is required".to_string())),
    }
}

fn build_request(
    date: &str,
    clock: ClockTime,
    lunar: bool,
    leap: bool,
) -> Result<ChartRequest, CliError> {
    if lunar {
        let mut lunar_date: LunarDate = date
            .parse()
            .map_err(|e| CliError::Usage(format!("invalid lunar date: {e}")))?;
        lunar_date.leap |= leap;
        Ok(ChartRequest::lunar(lunar_date, clock))
    } else {
        Ok(ChartRequest::solar(date.parse()?, clock))
    }
}

/// Engine over the `--table` file, else the configured table, else rules only.
fn engine_for(table: Option<PathBuf>, config: &GanjiConfig) -> Result<ChartEngine, CliError> {
    let service = match table {
        Some(path) => Some(TableService::new(FileSource::new(path))),
        None => config.table.service(),
    };
    match service {
        Some(service) => {
            let engine = ChartEngine::from_service(&service)?;
            if let Some(t) = engine.table() {
                let (first, last) = t.range();
                info!(rows = t.len(), %first, %last, "reference table ready");
            }
            Ok(engine)
        }
        None => Ok(ChartEngine::rules_only()),
    }
}

fn describe(pillar: Pillar) -> String {
    format!("{pillar} ({}, {})", pillar.hangul(), pillar.romanized())
}

fn render_chart(chart: &Chart) -> String {
    let hangul: Vec<String> = chart.pillars().iter().map(|p| p.hangul()).collect();
    let counts = chart.element_counts();
    [
        format!("date      {} {}", chart.solar_date(), chart.clock()),
        format!("pillars   {chart}"),
        format!("hangul    {}", hangul.join(" ")),
        format!(
            "elements  {counts} (dominant: {})",
            counts.dominant().hanja()
        ),
        format!("note      {}", chart.annotation()),
    ]
    .join("\n")
}

fn render_chart_json(chart: &Chart) -> Result<String, CliError> {
    let value = serde_json::json!({
        "chart": chart,
        "elements": chart.element_counts(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn render_hour(
    date: CivilDate,
    time: ClockTime,
    convention: ConventionArgs,
    config: &GanjiConfig,
) -> Result<String, CliError> {
    let conv = convention.apply(config.hour.convention());
    if !conv.is_valid() {
        return Err(CliError::Usage(format!(
            "correction of {} minutes is too large",
            conv.correction_minutes
        )));
    }
    let info = hour_pillar(date, time, &conv, day_pillar)?;
    Ok(format!(
        "{} ({}, adjusted {}, day {} {})",
        describe(info.pillar),
        info.branch.kind,
        info.branch.adjusted,
        info.day_date,
        info.day_pillar
    ))
}

fn tally(raw: &[String]) -> Result<ElementCounts, CliError> {
    let pillars = raw
        .iter()
        .map(|s| s.parse::<Pillar>())
        .collect::<Result<Vec<_>, _>>()?;
    let four: [Pillar; 4] = pillars.try_into().map_err(|v: Vec<Pillar>| {
        CliError::Usage(format!("expected 4 pillars, got {}", v.len()))
    })?;
    Ok(element_counts(four))
}

fn render_slots() -> String {
    TimeSlot::all()
        .iter()
        .map(|slot| {
            format!(
                "{:<13} {} ({})",
                slot.label(),
                slot.branch().hanja(),
                slot.representative()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_cmd(date: &str, time: Option<&str>, slot: Option<&str>) -> Commands {
        Commands::Chart {
            date: date.to_string(),
            time: time.map(|t| t.parse().unwrap()),
            slot: slot.map(str::to_string),
            lunar: false,
            leap: false,
            table: None,
            json: false,
            convention: ConventionArgs::default(),
        }
    }

    #[test]
    fn chart_text_output() {
        let out = run(
            chart_cmd("1971-07-07", Some("22:30"), None),
            &GanjiConfig::default(),
        )
        .unwrap();
        assert!(out.contains("pillars   辛亥 乙未 辛卯 己亥"));
        assert!(out.contains("hangul    신해 을미 신묘 기해"));
        assert!(out.contains("木2 火0 土2 金2 水2"));
        assert_eq!(out.lines().count(), 5);
        assert!(out.lines().last().unwrap().starts_with("note      regular hour"));
    }

    #[test]
    fn chart_by_slot_matches_time() {
        let cfg = GanjiConfig::default();
        let by_slot = run(chart_cmd("1971-07-07", None, Some("23:30-00:30")), &cfg).unwrap();
        let by_time = run(chart_cmd("1971-07-07", Some("23:40"), None), &cfg).unwrap();
        assert_eq!(by_slot, by_time);
        assert!(by_slot.contains("庚寅 丙子"));
    }

    #[test]
    fn unknown_slot_is_usage_error() {
        let err = run(
            chart_cmd("1971-07-07", None, Some("noon")),
            &GanjiConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn lunar_without_table_fails() {
        let cmd = Commands::Chart {
            date: "1971-05-15".to_string(),
            time: Some(ClockTime::new(12, 0).unwrap()),
            slot: None,
            lunar: true,
            leap: false,
            table: None,
            json: false,
            convention: ConventionArgs::default(),
        };
        let err = run(cmd, &GanjiConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("unsupported input"));
    }

    #[test]
    fn lunar_with_table_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pillars.csv");
        std::fs::write(&path, "2024-02-04, 2023-12-25, 甲辰, 丙寅, 丙申, 17:27\n").unwrap();
        let cmd = Commands::Chart {
            date: "2023-12-25".to_string(),
            time: Some(ClockTime::new(18, 0).unwrap()),
            slot: None,
            lunar: true,
            leap: false,
            table: Some(path),
            json: true,
            convention: ConventionArgs::default(),
        };
        let out = run(cmd, &GanjiConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["chart"]["year"], "甲辰");
        assert_eq!(value["chart"]["source"], "table");
        assert_eq!(value["elements"]["Fire"], 3);
    }

    #[test]
    fn single_pillar_commands() {
        let cfg = GanjiConfig::default();
        let date = CivilDate::new(2024, 3, 5).unwrap();
        assert_eq!(
            run(Commands::Year { date }, &cfg).unwrap(),
            "甲辰 (갑진, Gap-Jin), year of the Dragon"
        );
        let month = run(Commands::Month { date }, &cfg).unwrap();
        assert!(month.starts_with("丁卯"));
        assert!(month.contains("경칩 from 2024-03-05"));
        let day = CivilDate::new(1984, 2, 2).unwrap();
        assert!(run(Commands::Day { date: day }, &cfg).unwrap().starts_with("甲子 (갑자, Gap-Ja)"));
    }

    #[test]
    fn hour_command_reports_day_correction() {
        let out = run(
            Commands::Hour {
                date: CivilDate::new(1971, 7, 7).unwrap(),
                time: ClockTime::new(23, 40).unwrap(),
                convention: ConventionArgs::default(),
            },
            &GanjiConfig::default(),
        )
        .unwrap();
        assert!(out.starts_with("丙子"));
        assert!(out.contains("day 1971-07-06 庚寅"));
    }

    #[test]
    fn elements_command() {
        let pillars = ["辛亥", "乙未", "辛卯", "己亥"].map(String::from).to_vec();
        let out = run(
            Commands::Elements {
                pillars: pillars.clone(),
                json: false,
            },
            &GanjiConfig::default(),
        )
        .unwrap();
        assert_eq!(out, "木2 火0 土2 金2 水2 (dominant: 木)");

        let err = run(
            Commands::Elements {
                pillars: pillars[..3].to_vec(),
                json: false,
            },
            &GanjiConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn slots_lists_thirteen() {
        let out = run(Commands::Slots, &GanjiConfig::default()).unwrap();
        assert_eq!(out.lines().count(), 13);
        assert!(out.lines().next().unwrap().starts_with("23:30–00:30"));
    }
}
