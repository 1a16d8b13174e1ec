//! CSV-file [`RecordStore`].
//!
//! Reads a UTF-8 CSV file with a header row. Each configured column is
//! looked up by header name; a column that is absent (or a row too short to
//! reach it) degrades to a default instead of failing: `"-"` for the
//! publisher, the empty string for everything else.
//!
//! The store's [`VersionMarker`] is the file's modification time plus its
//! length, so an edited file is detected even on filesystems with coarse
//! timestamps as long as its size changed.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

use bookshelf_core::models::{BookRecord, Field, DEFAULT_PUBLISHER};
use bookshelf_core::store::{RecordStore, VersionMarker};

use crate::config::{ColumnsConfig, Config};

/// A book catalog stored as a CSV file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
    id: String,
    columns: ColumnsConfig,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, columns: ColumnsConfig) -> Self {
        let path = path.into();
        let id = format!("csv:{}", path.display());
        Self { path, id, columns }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.catalog.path, config.catalog.columns.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &ColumnsConfig {
        &self.columns
    }

    fn ensure_exists(&self) -> Result<()> {
        if !self.path.exists() {
            bail!("Catalog file not found: {}", self.path.display());
        }
        Ok(())
    }
}

impl RecordStore for CsvStore {
    fn source_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> Result<VersionMarker> {
        self.ensure_exists()?;
        let metadata = std::fs::metadata(&self.path)
            .with_context(|| format!("Failed to stat catalog file: {}", self.path.display()))?;
        let modified = metadata.modified().unwrap_or(UNIX_EPOCH);

        Ok(VersionMarker::File {
            modified_ns: unix_nanos(modified),
            len: metadata.len(),
        })
    }

    fn load(&self) -> Result<Vec<BookRecord>> {
        self.ensure_exists()?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open catalog file: {}", self.path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header: {}", self.path.display()))?
            .clone();

        let position = |field: Field| {
            let name = self.columns.column(field).trim();
            headers.iter().position(|h| h.trim() == name)
        };
        let code_idx = position(Field::Code);
        let title_idx = position(Field::Title);
        let author_idx = position(Field::Author);
        let publisher_idx = position(Field::Publisher);

        for (field, idx) in [
            (Field::Code, code_idx),
            (Field::Title, title_idx),
            (Field::Author, author_idx),
        ] {
            if idx.is_none() {
                warn!(
                    column = self.columns.column(field),
                    path = %self.path.display(),
                    "catalog column missing; {} values will be empty",
                    field
                );
            }
        }
        if publisher_idx.is_none() {
            debug!(
                column = %self.columns.publisher,
                "no publisher column; defaulting to '{}'",
                DEFAULT_PUBLISHER
            );
        }

        let mut records = Vec::new();
        for (n, row) in reader.records().enumerate() {
            let row = row.with_context(|| {
                format!(
                    "Failed to parse CSV record {} in {}",
                    n + 1,
                    self.path.display()
                )
            })?;
            let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i));

            records.push(BookRecord {
                code: cell(code_idx).unwrap_or_default().to_string(),
                title: cell(title_idx).unwrap_or_default().to_string(),
                author: cell(author_idx).unwrap_or_default().to_string(),
                publisher: cell(publisher_idx)
                    .unwrap_or(DEFAULT_PUBLISHER)
                    .to_string(),
            });
        }

        debug!(
            path = %self.path.display(),
            records = records.len(),
            "catalog loaded"
        );
        Ok(records)
    }
}

/// Nanoseconds since the Unix epoch, negative for earlier times.
fn unix_nanos(time: SystemTime) -> i128 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as i128,
        Err(e) => -(e.duration().as_nanos() as i128),
    }
}
