//! Reference-table file formats.
//!
//! Text format, one day per line, comma separated:
//!
//! ```text
//! # solar, lunar, year, month, day[, term_start]
//! 1971-07-07, 1971-05-15, 辛亥, 乙未, 辛卯, 19:51
//! 1971-07-08, 1971-05-16, 辛亥, 乙未, 壬辰
//! ```
//!
//! `#` starts a comment, blank lines are skipped, the lunar column may be
//! `-` when unknown, and a trailing `L` on the lunar date marks a leap month.
//! The JSON format is an array of [`TableRow`] objects.

use std::str::FromStr;

use ganji_base::Pillar;
use ganji_time::{CivilDate, ClockTime};
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::row::{LunarDate, TableRow};

/// On-disk encoding of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "csv" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown table format '{other}'")),
        }
    }
}

impl TableFormat {
    /// Guess the format from a file extension; anything but `.json` is text.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Parse table rows in the given format.
pub fn parse_rows(content: &str, format: TableFormat) -> Result<Vec<TableRow>, TableError> {
    match format {
        TableFormat::Text => parse_text_rows(content),
        TableFormat::Json => Ok(serde_json::from_str(content)?),
    }
}

/// Parse the comma-separated text format.
pub fn parse_text_rows(content: &str) -> Result<Vec<TableRow>, TableError> {
    let mut rows = Vec::new();
    for (i, raw) in content.lines().enumerate() {
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();
        if line.is_empty() {
            continue;
        }
        rows.push(parse_text_line(line).map_err(|msg| TableError::Parse { line: i + 1, msg })?);
    }
    Ok(rows)
}

fn parse_text_line(line: &str) -> Result<TableRow, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if !(5..=6).contains(&fields.len()) {
        return Err(format!("expected 5 or 6 fields, got {}", fields.len()));
    }

    let solar: CivilDate = fields[0]
        .parse()
        .map_err(|e| format!("solar date: {e}"))?;
    let lunar = match fields[1] {
        "" | "-" => None,
        s => Some(s.parse::<LunarDate>()?),
    };
    let year = parse_pillar(fields[2], "year")?;
    let month = parse_pillar(fields[3], "month")?;
    let day = parse_pillar(fields[4], "day")?;
    let term_start = match fields.get(5) {
        None | Some(&"") | Some(&"-") => None,
        Some(s) => Some(
            s.parse::<ClockTime>()
                .map_err(|e| format!("term start: {e}"))?,
        ),
    };

    Ok(TableRow {
        solar,
        lunar,
        year,
        month,
        day,
        term_start,
    })
}

fn parse_pillar(field: &str, which: &str) -> Result<Pillar, String> {
    field.parse().map_err(|e| format!("{which} pillar: {e}"))
}
