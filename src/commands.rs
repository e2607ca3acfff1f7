//! Command implementation for the csvdiff CLI

use crate::cli::{Cli, OutputFormat};
use crate::data::{Dataset, FileStats};
use crate::diff::{DiffEngine, DiffOptions};
use crate::error::Result;
use crate::output::{JsonReporter, LogReporter, PrettyPrinter, Reporter, RunSummary};
use crate::progress::ProgressReporter;
use std::path::Path;

/// Counts of a finished comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffCounts {
    pub differing: usize,
    pub missing: usize,
    pub equal: usize,
}

/// Execute the command described by the parsed arguments
pub fn execute_command(cli: &Cli) -> Result<DiffCounts> {
    let options = cli.diff_options();

    let mut progress = match cli.format {
        OutputFormat::Json => ProgressReporter::new_minimal(),
        OutputFormat::Log | OutputFormat::Pretty => ProgressReporter::new_for_diff(),
    };

    let mut reporter: Box<dyn Reporter> = match cli.format {
        OutputFormat::Log => Box::new(LogReporter::new(cli.show_missing)),
        OutputFormat::Pretty => Box::new(PrettyPrinter::stdout(cli.show_missing)),
        OutputFormat::Json => Box::new(JsonReporter::stdout()),
    };

    compare_files(
        &cli.file1,
        &cli.file2,
        options,
        reporter.as_mut(),
        &mut progress,
    )
}

/// Load both files, compare them and hand the result to `reporter`.
///
/// Nothing reaches the reporter unless every step succeeds.
pub fn compare_files(
    file1: &Path,
    file2: &Path,
    options: DiffOptions,
    reporter: &mut dyn Reporter,
    progress: &mut ProgressReporter,
) -> Result<DiffCounts> {
    let first_stats = FileStats::read(file1)?;
    let second_stats = FileStats::read(file2)?;

    let first = load_with_progress(file1, progress)?;
    let second = load_with_progress(file2, progress)?;

    progress.start_compare();
    let result = DiffEngine::new(options).diff(&first, &second)?;
    progress.finish_compare(&format!(
        "Compared {} rows of {} against {}",
        result.probe_rows, result.probe_provenance, result.indexed_provenance
    ));

    let summary = RunSummary {
        first: first_stats,
        second: second_stats,
        first_rows: first.row_count(),
        second_rows: second.row_count(),
    };
    reporter.report(&summary, &result)?;

    Ok(DiffCounts {
        differing: result.differing.len(),
        missing: result.missing.len(),
        equal: result.equal.len(),
    })
}

fn load_with_progress(path: &Path, progress: &mut ProgressReporter) -> Result<Dataset> {
    progress.start_loading(&path.display().to_string());
    let dataset = Dataset::load(path)?;
    progress.finish_loading(&format!(
        "Loaded {} ({} rows)",
        dataset.provenance,
        dataset.row_count()
    ));
    Ok(dataset)
}
