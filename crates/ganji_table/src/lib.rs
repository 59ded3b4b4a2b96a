//! Optional reference table of precomputed pillars.
//!
//! This crate provides:
//! - The table row model (solar date, lunar date, year/month/day pillars,
//!   optional solar-term start time)
//! - Text and JSON table parsers
//! - `ReferenceTable`, an immutable date index with lunar→solar lookup
//! - `TableService`, a load-once holder fed by an injected `TableSource`
//!
//! A table supersedes the rule engine for the dates it covers; everything
//! outside its range is left to `ganji_base`.

pub mod error;
pub mod parse;
pub mod row;
pub mod service;
pub mod table;

pub use error::TableError;
pub use parse::{TableFormat, parse_rows, parse_text_rows};
pub use row::{LunarDate, TableRow};
pub use service::{FileSource, TableService, TableSource, TextSource};
pub use table::ReferenceTable;
