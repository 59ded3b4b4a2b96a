use ganji_base::BaseError;
use ganji_chart::ChartError;
use ganji_table::TableError;
use ganji_time::TimeError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Base(#[from] BaseError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}
