//! Command-line interface for csvdiff

use crate::diff::{DiffOptions, LengthMismatchPolicy, DEFAULT_KEY_COLUMN};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csvdiff")]
#[command(about = "Compare two CSV files row by row using a key column")]
#[command(version)]
pub struct Cli {
    /// First CSV file
    pub file1: PathBuf,

    /// Second CSV file
    pub file2: PathBuf,

    /// Zero-based index of the key column shared by both files
    #[arg(long, short = 'k', default_value_t = DEFAULT_KEY_COLUMN)]
    pub key_column: usize,

    /// Rows with the same key but a different field count: "fail" or "report"
    #[arg(long, default_value = "fail", value_parser = LengthMismatchPolicy::parse)]
    pub on_length_mismatch: LengthMismatchPolicy,

    /// Output format: "log", "pretty" or "json"
    #[arg(long, default_value = "log", value_parser = OutputFormat::parse)]
    pub format: OutputFormat,

    /// List every missing row, not only the count
    #[arg(long)]
    pub show_missing: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            key_column: self.key_column,
            length_mismatch: self.on_length_mismatch,
        }
    }
}

/// Parse output format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Log,
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'log', 'pretty' or 'json'", s)),
        }
    }
}
