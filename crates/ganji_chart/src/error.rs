//! Error types for chart computation.

use ganji_base::BaseError;
use ganji_table::TableError;
use ganji_time::TimeError;

/// Errors from assembling a chart. No partial chart is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Input the engine refuses to approximate (e.g. lunar date, no resolver).
    #[error("unsupported input: {0}")]
    UnsupportedInput(&'static str),
    /// An authoritative table has no entry for the requested date.
    #[error("lookup miss: {0}")]
    LookupMiss(String),
    /// A pre-fetched pillar string is not a stem-branch pair.
    #[error("malformed external response for {field} pillar: {value:?} ({reason})")]
    MalformedExternalResponse {
        field: &'static str,
        value: String,
        reason: BaseError,
    },
    /// Hour convention outside the supported range.
    #[error("invalid hour convention: correction of {0} minutes is too large")]
    InvalidConvention(u16),
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    #[error("pillar error: {0}")]
    Base(#[from] BaseError),
    #[error("table error: {0}")]
    Table(TableError),
}

impl From<TableError> for ChartError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::LookupMiss(date) => Self::LookupMiss(format!("solar date {date}")),
            TableError::LunarLookupMiss(lunar) => Self::LookupMiss(format!("lunar date {lunar}")),
            other => Self::Table(other),
        }
    }
}
