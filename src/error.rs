//! Error types for csvdiff operations

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CsvDiffError>;

#[derive(Error, Debug)]
pub enum CsvDiffError {
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error in '{provenance}': {source}")]
    Parse {
        provenance: String,
        #[source]
        source: csv::Error,
    },

    #[error("Not enough columns in '{provenance}' row {row}: key column {key_column} requested, row has {found} fields")]
    InsufficientColumns {
        provenance: String,
        row: usize,
        key_column: usize,
        found: usize,
    },

    #[error("Duplicate key '{key}' in '{provenance}': rows {first_row} and {row}")]
    DuplicateKey {
        provenance: String,
        key: String,
        first_row: usize,
        row: usize,
    },

    #[error("Row length mismatch for key '{key}': {left_provenance} has {left_len} fields, {right_provenance} has {right_len}")]
    LengthMismatch {
        key: String,
        left_provenance: String,
        left_len: usize,
        right_provenance: String,
        right_len: usize,
    },

    /// Rejected command-line arguments; `message` carries clap's rendered usage
    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CsvDiffError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(provenance: impl Into<String>, source: csv::Error) -> Self {
        Self::Parse {
            provenance: provenance.into(),
            source,
        }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage {
            message: msg.into(),
        }
    }
}

impl From<clap::Error> for CsvDiffError {
    fn from(error: clap::Error) -> Self {
        Self::usage(error.to_string())
    }
}
