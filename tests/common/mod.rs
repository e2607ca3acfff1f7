//! Common test utilities and helpers

use csvdiff::cli::Cli;
use csvdiff::commands::{compare_files, DiffCounts};
use csvdiff::output::RunSummary;
use csvdiff::progress::ProgressReporter;
use csvdiff::{DiffResult, Reporter, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture manager for creating temporary CSV files
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        Ok(Self { temp_dir })
    }

    /// Get the root path of the test fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a test CSV file with sample data
    pub fn create_csv(&self, name: &str, data: &[Vec<&str>]) -> Result<PathBuf> {
        let path = self.root().join(name);
        let mut content = String::new();

        for row in data {
            content.push_str(&row.join(","));
            content.push('\n');
        }

        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a test CSV file with raw string content
    pub fn create_csv_raw(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a large CSV whose key column (index 1) is `key_<row>`
    pub fn create_large_csv(&self, name: &str, rows: usize, cols: usize) -> Result<PathBuf> {
        let path = self.root().join(name);
        let mut content = String::new();

        for i in 0..cols {
            if i > 0 {
                content.push(',');
            }
            content.push_str(&format!("col_{}", i));
        }
        content.push('\n');

        for row in 0..rows {
            for col in 0..cols {
                if col > 0 {
                    content.push(',');
                }
                if col == 1 {
                    content.push_str(&format!("key_{}", row));
                } else {
                    content.push_str(&format!("value_{}_{}", row, col));
                }
            }
            content.push('\n');
        }

        fs::write(&path, content)?;
        Ok(path)
    }
}

/// A field difference captured by `RecordingReporter`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDelta {
    pub key: String,
    pub index: usize,
    pub header: Option<String>,
    pub left: String,
    pub right: String,
    pub left_provenance: String,
    pub right_provenance: String,
}

/// Reporter that keeps an owned copy of everything it was given
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub calls: usize,
    pub probe_provenance: String,
    pub indexed_provenance: String,
    pub first_rows: usize,
    pub second_rows: usize,
    pub missing: Vec<(String, usize, String)>,
    pub differing: Vec<String>,
    pub equal: Vec<String>,
    pub deltas: Vec<RecordedDelta>,
    pub length_mismatches: Vec<(String, usize, usize)>,
}

impl Reporter for RecordingReporter {
    fn report(&mut self, summary: &RunSummary, result: &DiffResult<'_>) -> Result<()> {
        self.calls += 1;
        self.probe_provenance = result.probe_provenance.to_string();
        self.indexed_provenance = result.indexed_provenance.to_string();
        self.first_rows = summary.first_rows;
        self.second_rows = summary.second_rows;
        self.missing = result
            .missing
            .iter()
            .map(|r| (r.key.to_string(), r.position, r.provenance.to_string()))
            .collect();
        self.equal = result.equal.iter().map(|p| p.probe.key.to_string()).collect();
        self.differing = result
            .differing
            .iter()
            .map(|d| d.pair.probe.key.to_string())
            .collect();
        for pair in &result.differing {
            if let Some(mismatch) = pair.length_mismatch {
                self.length_mismatches.push((
                    pair.pair.probe.key.to_string(),
                    mismatch.left_len,
                    mismatch.right_len,
                ));
            }
            for d in &pair.deltas {
                self.deltas.push(RecordedDelta {
                    key: pair.pair.probe.key.to_string(),
                    index: d.index,
                    header: d.header.map(str::to_string),
                    left: d.left_value.to_string(),
                    right: d.right_value.to_string(),
                    left_provenance: d.left_provenance.to_string(),
                    right_provenance: d.right_provenance.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Helper for running comparisons the way the CLI does
pub struct CliTestRunner {
    fixture: TestFixture,
}

impl CliTestRunner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: TestFixture::new()?,
        })
    }

    pub fn fixture(&self) -> &TestFixture {
        &self.fixture
    }

    /// Parse `args` as csvdiff arguments and run the comparison into `reporter`
    pub fn run_with(&self, args: &[&str], reporter: &mut dyn Reporter) -> Result<DiffCounts> {
        use clap::Parser;

        let mut cmd_args = vec!["csvdiff"];
        cmd_args.extend(args);

        let cli = Cli::try_parse_from(cmd_args)
            .map_err(csvdiff::CsvDiffError::from)?;

        let mut progress = ProgressReporter::new_minimal();
        compare_files(
            &cli.file1,
            &cli.file2,
            cli.diff_options(),
            reporter,
            &mut progress,
        )
    }

    /// Run a comparison and return the recorded report
    pub fn run_command(&self, args: &[&str]) -> Result<RecordingReporter> {
        let mut reporter = RecordingReporter::default();
        self.run_with(args, &mut reporter)?;
        Ok(reporter)
    }

    /// Run a command and expect it to succeed
    pub fn expect_success(&self, args: &[&str]) -> RecordingReporter {
        self.run_command(args).expect("Command should succeed")
    }

    /// Run a command and expect it to fail
    pub fn expect_failure(&self, args: &[&str]) -> csvdiff::CsvDiffError {
        self.run_command(args).expect_err("Command should fail")
    }

    /// Write a CSV into the fixture and return its path as a string
    pub fn csv(&self, name: &str, data: &[Vec<&str>]) -> String {
        self.fixture
            .create_csv(name, data)
            .expect("Should create CSV")
            .to_string_lossy()
            .into_owned()
    }
}

/// Sample data generators for testing
pub mod sample_data {
    pub fn simple_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["id", "symbol", "price"],
            vec!["1", "AAPL", "150.00"],
            vec!["2", "MSFT", "300.00"],
            vec!["3", "GOOG", "120.00"],
        ]
    }

    pub fn updated_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["id", "symbol", "price"],
            vec!["1", "AAPL", "155.00"], // Price changed
            vec!["2", "MSFT", "300.00"],
            vec!["4", "AMZN", "130.00"], // GOOG removed, AMZN added
        ]
    }

    pub fn reordered_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["id", "symbol", "price"],
            vec!["3", "GOOG", "120.00"],
            vec!["1", "AAPL", "150.00"],
            vec!["2", "MSFT", "300.00"],
        ]
    }
}
