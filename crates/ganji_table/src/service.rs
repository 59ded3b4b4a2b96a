//! Load-once access to a reference table.
//!
//! A [`TableService`] owns a [`TableSource`] and materializes the table on
//! the first successful [`TableService::load`]. Later calls return the same
//! snapshot without touching the source again. A failed load leaves the
//! service empty so the caller may retry or fall back to the rule engine.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::{debug, info, warn};

use crate::error::TableError;
use crate::parse::TableFormat;
use crate::table::ReferenceTable;

/// Where a reference table comes from.
pub trait TableSource: Debug + Send + Sync {
    /// Read and build the table.
    fn fetch(&self) -> Result<ReferenceTable, TableError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Table file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
    format: TableFormat,
}

impl FileSource {
    /// File whose format follows its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = TableFormat::from_path(&path);
        Self { path, format }
    }

    /// File with an explicit format.
    pub fn with_format(path: impl Into<PathBuf>, format: TableFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for FileSource {
    fn fetch(&self) -> Result<ReferenceTable, TableError> {
        let content = std::fs::read_to_string(&self.path)?;
        ReferenceTable::parse(&content, self.format)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Table content already in memory (embedded data, tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSource {
    content: String,
    format: TableFormat,
}

impl TextSource {
    pub fn new(content: impl Into<String>, format: TableFormat) -> Self {
        Self {
            content: content.into(),
            format,
        }
    }
}

impl TableSource for TextSource {
    fn fetch(&self) -> Result<ReferenceTable, TableError> {
        ReferenceTable::parse(&self.content, self.format)
    }

    fn describe(&self) -> String {
        format!("in-memory {:?} ({} bytes)", self.format, self.content.len())
    }
}

/// Lazily loaded, write-once reference table.
#[derive(Debug)]
pub struct TableService {
    source: Box<dyn TableSource>,
    table: OnceLock<Arc<ReferenceTable>>,
    loading: Mutex<()>,
}

impl TableService {
    pub fn new(source: impl TableSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            table: OnceLock::new(),
            loading: Mutex::new(()),
        }
    }

    /// Load the table, or return the snapshot from an earlier load.
    ///
    /// The source is read at most once per successful load, even when
    /// several threads race here.
    pub fn load(&self) -> Result<Arc<ReferenceTable>, TableError> {
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        // The guard protects no data; a poisoned lock is still usable.
        let _guard = self.loading.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = self.table.get() {
            debug!("reference table loaded by another caller");
            return Ok(Arc::clone(table));
        }

        let table = match self.source.fetch() {
            Ok(t) => Arc::new(t),
            Err(e) => {
                warn!(source = %self.source.describe(), error = %e, "reference table load failed");
                return Err(e);
            }
        };
        let (first, last) = table.range();
        info!(
            source = %self.source.describe(),
            rows = table.len(),
            %first,
            %last,
            "reference table loaded"
        );
        Ok(Arc::clone(self.table.get_or_init(|| table)))
    }

    /// Snapshot if already loaded; never reads the source.
    pub fn get(&self) -> Option<Arc<ReferenceTable>> {
        self.table.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }
}
