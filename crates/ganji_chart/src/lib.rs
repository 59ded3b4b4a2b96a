//! Four-pillar chart assembly.
//!
//! This crate provides:
//! - `chart` and `chart_with_table`, the two entry points over the rule
//!   engine and an optional reference table
//! - `ChartEngine`, a front-end holding a shared table snapshot
//! - `chart_from_external`, intake of pillar strings from a live source
//! - The `PillarTable` and `LunarResolver` collaborator traits
//!
//! All computation is synchronous and performs no I/O.

pub mod chart;
pub mod chart_types;
pub mod collab;
pub mod error;
pub mod external;

pub use chart::{ChartEngine, chart, chart_with_table, element_counts};
pub use chart_types::{
    CalendarInput, Chart, ChartRequest, HourDetail, PillarSource, TermAdjustment,
};
pub use collab::{LunarResolver, PillarTable};
pub use error::ChartError;
pub use external::{ExternalPillars, chart_from_external};
