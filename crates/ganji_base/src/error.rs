//! Error types for stem/branch and pillar handling.

use ganji_time::TimeError;

use crate::branch::Branch;
use crate::stem::Stem;

/// Errors from pillar construction, parsing, and date-shifted rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BaseError {
    /// Stem and branch parities differ, so the pair is not in the 60-cycle.
    #[error("{stem:?}/{branch:?} is not a position of the sexagenary cycle")]
    ParityMismatch { stem: Stem, branch: Branch },
    /// Character is neither a known stem nor a known branch glyph.
    #[error("unknown stem/branch symbol '{0}'")]
    UnknownSymbol(char),
    /// Pillar text is not exactly two symbols.
    #[error("pillar must be exactly two symbols, got '{0}'")]
    BadPillarLength(String),
    /// Date arithmetic left the supported calendar range.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
