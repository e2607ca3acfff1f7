//! Loading CSV files into in-memory datasets

use crate::error::{CsvDiffError, Result};
use csv::ReaderBuilder;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A single data row: positional string fields
pub type Row = Vec<String>;

/// A fully materialized CSV file: header row, data rows and provenance label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub provenance: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from already parsed records
    pub fn from_records(
        provenance: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Row>,
    ) -> Self {
        Self {
            provenance: provenance.into(),
            headers,
            rows,
        }
    }

    /// Load a CSV file. The first record is the header, the rest are data rows.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| CsvDiffError::io(path, e))?;
        Self::read_csv(provenance_for(path), file, path)
    }

    /// Parse CSV content from any reader
    pub fn from_reader<R: Read>(provenance: impl Into<String>, reader: R) -> Result<Self> {
        let provenance = provenance.into();
        let source = PathBuf::from(&provenance);
        Self::read_csv(provenance, reader, &source)
    }

    fn read_csv<R: Read>(provenance: String, reader: R, source: &Path) -> Result<Self> {
        // Ragged rows are allowed through so the diff can report them precisely
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut headers = Vec::new();
        let mut rows = Vec::new();

        for (line_number, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| csv_error(&provenance, source, e))?;
            let fields: Row = record.iter().map(str::to_string).collect();
            log::trace!("{} line {}: {}", provenance, line_number, fields.join(", "));

            if line_number == 0 {
                headers = fields;
            } else {
                rows.push(fields);
            }
        }

        log::debug!(
            "Loaded '{}': {} columns in header, {} rows",
            provenance,
            headers.len(),
            rows.len()
        );

        Ok(Self {
            provenance,
            headers,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Headers as an optional slice, `None` when the file had no header row
    pub fn header_slice(&self) -> Option<&[String]> {
        if self.headers.is_empty() {
            None
        } else {
            Some(&self.headers)
        }
    }
}

/// Read failures of the underlying file are I/O errors, everything else is malformed content
fn csv_error(provenance: &str, source: &Path, error: csv::Error) -> CsvDiffError {
    if !error.is_io_error() {
        return CsvDiffError::parse(provenance, error);
    }
    match error.into_kind() {
        csv::ErrorKind::Io(io) => CsvDiffError::io(source, io),
        other => CsvDiffError::io(
            source,
            std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", other)),
        ),
    }
}

/// Size information about an input file
#[derive(Debug, Clone, Serialize)]
pub struct FileStats {
    pub path: PathBuf,
    pub provenance: String,
    pub size_bytes: u64,
}

impl FileStats {
    pub fn read(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| CsvDiffError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            provenance: provenance_for(path),
            size_bytes: metadata.len(),
        })
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// The base name of a path, used to label rows and differences
pub fn provenance_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
