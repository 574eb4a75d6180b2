// Storage access: the directory lives in a single comma-delimited file
// whose first row is the header. Every read loads the whole file and every
// write replaces it; there is no locking and no crash-safe rename.

use crate::error::{DirectoryError, Result};
use crate::fields::FIELD_COUNT;
use crate::record::Record;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle to the backing CSV file.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create (or truncate) the file so that it holds only the header row.
    pub fn create_file(&self) -> Result<()> {
        debug!(path = %self.path.display(), "creating storage file");
        self.write_all(&[Record::header()])
    }

    /// Create the file with a header unless it already exists.
    pub fn ensure_file(&self) -> Result<()> {
        if !self.file_exists() {
            self.create_file()?;
        }
        Ok(())
    }

    /// Read every row, header first.
    pub fn read_all(&self) -> Result<Vec<Record>> {
        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row?;
            if row.len() != FIELD_COUNT {
                return Err(DirectoryError::Malformed(format!(
                    "row {} has {} fields, expected {}",
                    line + 1,
                    row.len(),
                    FIELD_COUNT
                )));
            }
            rows.push(row.deserialize::<Record>(None)?);
        }
        if rows.is_empty() {
            return Err(DirectoryError::Malformed("missing header row".into()));
        }
        debug!(path = %self.path.display(), rows = rows.len(), "read storage file");
        Ok(rows)
    }

    /// Replace the file contents with `rows`. Callers pass the header as
    /// the first row.
    pub fn write_all(&self, rows: &[Record]) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        debug!(path = %self.path.display(), rows = rows.len(), "wrote storage file");
        Ok(())
    }
}
