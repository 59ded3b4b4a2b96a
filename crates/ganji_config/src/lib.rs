//! Configuration loading for the ganji engine.
//!
//! A config file is TOML with three optional sections:
//!
//! ```toml
//! [hour]
//! correction_minutes = 30
//! rat_split = "adjusted_midnight"   # or "raw_midnight"
//!
//! [table]
//! path = "pillars.csv"
//! format = "text"                   # or "json"; inferred from the extension if absent
//!
//! [logging]
//! filter = "ganji_chart=debug"
//! ```
//!
//! Every field has a default, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use ganji_base::{HourConvention, KST_CORRECTION_MINUTES, MAX_CORRECTION_MINUTES, RatSplit};
use ganji_table::{FileSource, TableFormat, TableService};
use serde::{Deserialize, Serialize};

/// Log filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {source}")]
    Toml { source: toml::de::Error },
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(source: toml::de::Error) -> Self {
        Self::Toml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GanjiConfig {
    pub hour: HourConfig,
    pub table: TableConfig,
    pub logging: LoggingConfig,
}

/// Hour-pillar convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HourConfig {
    /// Minutes subtracted from the wall clock before bucketing.
    pub correction_minutes: u16,
    pub rat_split: RatSplit,
}

impl Default for HourConfig {
    fn default() -> Self {
        Self {
            correction_minutes: KST_CORRECTION_MINUTES,
            rat_split: RatSplit::default(),
        }
    }
}

impl HourConfig {
    pub fn convention(&self) -> HourConvention {
        HourConvention {
            correction_minutes: self.correction_minutes,
            rat_split: self.rat_split,
        }
    }
}

/// Optional reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub path: Option<PathBuf>,
    pub format: Option<TableFormat>,
}

impl TableConfig {
    /// File source for the configured table, if one is configured.
    pub fn source(&self) -> Option<FileSource> {
        let path = self.path.as_ref()?;
        Some(match self.format {
            Some(format) => FileSource::with_format(path, format),
            None => FileSource::new(path),
        })
    }

    /// Load-once service over the configured table, if one is configured.
    pub fn service(&self) -> Option<TableService> {
        self.source().map(TableService::new)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn filter_or_default(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

impl GanjiConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// A relative `table.path` is resolved against the config file's
    /// directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        if let (Some(table), Some(dir)) = (config.table.path.as_mut(), path.parent()) {
            if table.is_relative() {
                *table = dir.join(&*table);
            }
        }
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hour.correction_minutes > MAX_CORRECTION_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "hour.correction_minutes = {} exceeds the maximum of {MAX_CORRECTION_MINUTES}",
                self.hour.correction_minutes
            )));
        }
        if self
            .table
            .path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid("table.path is empty".to_string()));
        }
        if self
            .logging
            .filter
            .as_ref()
            .is_some_and(|f| f.trim().is_empty())
        {
            return Err(ConfigError::Invalid("logging.filter is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let c = GanjiConfig::parse("").unwrap();
        assert_eq!(c, GanjiConfig::default());
        assert_eq!(c.hour.convention(), HourConvention::default());
        assert!(c.table.source().is_none());
        assert_eq!(c.logging.filter_or_default(), "warn");
    }

    #[test]
    fn full_file() {
        let c = GanjiConfig::parse(
            r#"
            [hour]
            correction_minutes = 0
            rat_split = "raw_midnight"

            [table]
            path = "pillars.json"
            format = "json"

            [logging]
            filter = "ganji_chart=debug"
            "#,
        )
        .unwrap();
        assert_eq!(c.hour.correction_minutes, 0);
        assert_eq!(c.hour.rat_split, RatSplit::RawMidnight);
        assert_eq!(c.table.format, Some(TableFormat::Json));
        let source = c.table.source().unwrap();
        assert_eq!(source.path(), Path::new("pillars.json"));
        assert_eq!(c.logging.filter_or_default(), "ganji_chart=debug");
    }

    #[test]
    fn oversized_correction_is_invalid() {
        let err = GanjiConfig::parse("[hour]\ncorrection_minutes = 61\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = GanjiConfig::parse("[hour]\noffset = 30\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn unknown_rat_split_rejected() {
        let err = GanjiConfig::parse("[hour]\nrat_split = \"noon\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn blank_filter_is_invalid() {
        let err = GanjiConfig::parse("[logging]\nfilter = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
