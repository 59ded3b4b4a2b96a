//! Error types for reference-table loading and lookup.

use ganji_time::CivilDate;

use crate::row::LunarDate;

/// Errors from reading, parsing, or querying a reference table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TableError {
    /// I/O error while reading the table source.
    #[error("I/O error: {0}")]
    Io(String),
    /// Text table line could not be parsed.
    #[error("table parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },
    /// JSON table could not be parsed.
    #[error("JSON table error: {0}")]
    Json(String),
    /// Source held no rows.
    #[error("reference table has no rows")]
    Empty,
    /// Two rows share a solar date.
    #[error("duplicate row for {0}")]
    Duplicate(CivilDate),
    /// Two rows claim the same lunar date.
    #[error("duplicate lunar date {0}")]
    DuplicateLunar(LunarDate),
    /// Solar date not present in the table.
    #[error("no table entry for {0}")]
    LookupMiss(CivilDate),
    /// Lunar date not present in the table.
    #[error("no table entry for lunar date {0}")]
    LunarLookupMiss(LunarDate),
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
