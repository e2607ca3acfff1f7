//! # csvdiff
//!
//! Keyed comparison of two CSV snapshots. Rows are matched on a key column
//! and classified as missing, differing or equal; differing rows are broken
//! down into per-field deltas.

pub mod cli;
pub mod commands;
pub mod data;
pub mod diff;
pub mod error;
pub mod index;
pub mod output;
pub mod progress;

pub use data::{Dataset, FileStats};
pub use diff::{DiffEngine, DiffOptions, DiffResult, FieldDelta, LengthMismatchPolicy};
pub use error::{CsvDiffError, Result};
pub use index::{KeyIndex, RowRecord};
pub use output::Reporter;
