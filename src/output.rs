//! Rendering of comparison results

use crate::data::FileStats;
use crate::diff::{DiffResult, DifferingPair};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Input sizes for both files, in command-line order
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub first: FileStats,
    pub second: FileStats,
    pub first_rows: usize,
    pub second_rows: usize,
}

impl RunSummary {
    /// Size difference in megabytes (second minus first)
    pub fn size_diff_mb(&self) -> f64 {
        self.second.size_mb() - self.first.size_mb()
    }

    /// Row count difference (second minus first)
    pub fn row_diff(&self) -> i64 {
        self.second_rows as i64 - self.first_rows as i64
    }
}

/// Receives the finished comparison and renders it somewhere
pub trait Reporter {
    fn report(&mut self, summary: &RunSummary, result: &DiffResult<'_>) -> Result<()>;
}

/// Emits the report as `log` records at info level
#[derive(Debug, Default)]
pub struct LogReporter {
    show_missing: bool,
}

impl LogReporter {
    pub fn new(show_missing: bool) -> Self {
        Self { show_missing }
    }

    /// The lines that `report` logs, in order
    pub fn render_lines(&self, summary: &RunSummary, result: &DiffResult<'_>) -> Vec<String> {
        let mut lines = vec![
            format!(
                "size diff in mega bytes: {:.6}, {}: {:.6}, {}: {:.6}",
                summary.size_diff_mb(),
                summary.second.provenance,
                summary.second.size_mb(),
                summary.first.provenance,
                summary.first.size_mb()
            ),
            format!(
                "len diff: {}, {}: {}, {}: {}",
                summary.row_diff(),
                summary.second.provenance,
                summary.second_rows,
                summary.first.provenance,
                summary.first_rows
            ),
        ];

        for (i, pair) in result.differing.iter().enumerate() {
            if let Some(mismatch) = pair.length_mismatch {
                lines.push(format!("i={} key={} {}", i, pair.pair.probe.key, mismatch));
            }
            for (j, d) in pair.deltas.iter().enumerate() {
                lines.push(format!(
                    "i={} j={} key={} index={} header={} {}={:?} {}={:?}",
                    i,
                    j,
                    pair.pair.probe.key,
                    d.index,
                    d.header.unwrap_or(""),
                    d.left_provenance,
                    d.left_value,
                    d.right_provenance,
                    d.right_value
                ));
            }
        }

        if self.show_missing {
            for record in &result.missing {
                lines.push(format!(
                    "missing key={} row={} in {} (absent from {})",
                    record.key, record.position, record.provenance, result.indexed_provenance
                ));
            }
        }

        lines.push(format!("diff lines: {}", result.differing.len()));
        lines.push(format!("missing lines: {}", result.missing.len()));
        lines.push(format!("equal lines: {}", result.equal.len()));
        lines
    }
}

impl Reporter for LogReporter {
    fn report(&mut self, summary: &RunSummary, result: &DiffResult<'_>) -> Result<()> {
        for line in self.render_lines(summary, result) {
            log::info!("{}", line);
        }
        Ok(())
    }
}

/// Tree-style human readable output
pub struct PrettyPrinter<W: Write> {
    out: W,
    show_missing: bool,
}

impl PrettyPrinter<std::io::Stdout> {
    pub fn stdout(show_missing: bool) -> Self {
        Self::new(std::io::stdout(), show_missing)
    }
}

impl<W: Write> PrettyPrinter<W> {
    pub fn new(out: W, show_missing: bool) -> Self {
        Self { out, show_missing }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_differing(&mut self, differing: &[DifferingPair<'_>]) -> Result<()> {
        for (i, pair) in differing.iter().enumerate() {
            let last_pair = i == differing.len() - 1;
            let pair_prefix = if last_pair { "└─" } else { "├─" };
            let child_prefix = if last_pair { "   " } else { "│  " };
            writeln!(
                self.out,
                "│  {} Key '{}' (row {} → row {}): {} fields changed",
                pair_prefix,
                pair.pair.probe.key,
                pair.pair.probe.position,
                pair.pair.indexed.position,
                pair.deltas.len()
            )?;

            if let Some(mismatch) = pair.length_mismatch {
                let marker = if pair.deltas.is_empty() { "└─" } else { "├─" };
                writeln!(self.out, "│  {}{} ⚠️  {}", child_prefix, marker, mismatch)?;
            }

            for (j, d) in pair.deltas.iter().enumerate() {
                let marker = if j == pair.deltas.len() - 1 { "└─" } else { "├─" };
                let column = match d.header {
                    Some(header) => format!("[{}] {}", d.index, header),
                    None => format!("[{}]", d.index),
                };
                writeln!(
                    self.out,
                    "│  {}{} {}: '{}' ({}) → '{}' ({})",
                    child_prefix,
                    marker,
                    column,
                    d.left_value,
                    d.left_provenance,
                    d.right_value,
                    d.right_provenance
                )?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Reporter for PrettyPrinter<W> {
    fn report(&mut self, summary: &RunSummary, result: &DiffResult<'_>) -> Result<()> {
        writeln!(
            self.out,
            "🔍 CSV diff: {} → {} (key column {})",
            summary.first.provenance, summary.second.provenance, result.key_column
        )?;
        writeln!(
            self.out,
            "├─ Sizes: {} / {}",
            format_bytes(summary.first.size_bytes),
            format_bytes(summary.second.size_bytes)
        )?;
        writeln!(
            self.out,
            "├─ Rows: {} / {} (diff {:+})",
            summary.first_rows,
            summary.second_rows,
            summary.row_diff()
        )?;
        writeln!(
            self.out,
            "├─ Probed {} against index of {}",
            result.probe_provenance, result.indexed_provenance
        )?;

        if result.differing.is_empty() {
            writeln!(self.out, "├─ ✅ Differing rows: 0")?;
        } else {
            writeln!(self.out, "├─ ❌ Differing rows: {}", result.differing.len())?;
            self.print_differing(&result.differing)?;
        }

        if result.missing.is_empty() {
            writeln!(self.out, "├─ ✅ Missing rows: 0")?;
        } else {
            writeln!(
                self.out,
                "├─ ❌ Missing rows: {} (in {}, absent from {})",
                result.missing.len(),
                result.probe_provenance,
                result.indexed_provenance
            )?;
            if self.show_missing {
                for (i, record) in result.missing.iter().enumerate() {
                    let marker = if i == result.missing.len() - 1 { "└─" } else { "├─" };
                    writeln!(self.out, "│  {} Key '{}' (row {})", marker, record.key, record.position)?;
                }
            }
        }

        writeln!(self.out, "└─ Equal rows: {}", result.equal.len())?;
        Ok(())
    }
}

/// Machine-readable output
pub struct JsonReporter<W: Write> {
    out: W,
}

impl JsonReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, summary: &RunSummary, result: &DiffResult<'_>) -> Result<()> {
        let json = serde_json::json!({
            "summary": summary,
            "counts": {
                "differing": result.differing.len(),
                "missing": result.missing.len(),
                "equal": result.equal.len(),
            },
            "result": result,
        });
        serde_json::to_writer_pretty(&mut self.out, &json)?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Format bytes in human-readable format
fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
