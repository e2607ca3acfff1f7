//! Keyed row comparison between two datasets

use crate::data::Dataset;
use crate::error::{CsvDiffError, Result};
use crate::index::{Classification, KeyIndex, RowRecord};
use serde::Serialize;

/// Key column used when none is given
pub const DEFAULT_KEY_COLUMN: usize = 1;

/// What to do when a differing pair has rows of unequal length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthMismatchPolicy {
    /// Abort the run with `LengthMismatch`
    #[default]
    Fail,
    /// Record the mismatch on the pair and compare the shared prefix
    Report,
}

impl LengthMismatchPolicy {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "report" => Ok(Self::Report),
            _ => Err(format!(
                "Invalid length mismatch policy: {}. Use 'fail' or 'report'",
                s
            )),
        }
    }
}

/// Settings for a single comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffOptions {
    pub key_column: usize,
    pub length_mismatch: LengthMismatchPolicy,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY_COLUMN,
            length_mismatch: LengthMismatchPolicy::Fail,
        }
    }
}

/// One field where two correlated rows disagree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDelta<'a> {
    pub index: usize,
    pub header: Option<&'a str>,
    pub left_value: &'a str,
    pub right_value: &'a str,
    pub left_provenance: &'a str,
    pub right_provenance: &'a str,
}

/// Field counts of a differing pair whose rows are not the same length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthMismatch {
    pub left_len: usize,
    pub right_len: usize,
}

impl std::fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row length differs: {} vs {}", self.left_len, self.right_len)
    }
}

/// A probe-side record and its indexed counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordPair<'a> {
    pub probe: RowRecord<'a>,
    pub indexed: RowRecord<'a>,
}

/// A pair with the same key but different fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifferingPair<'a> {
    pub pair: RecordPair<'a>,
    pub deltas: Vec<FieldDelta<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_mismatch: Option<LengthMismatch>,
}

/// Classified rows of the probe dataset
#[derive(Debug, Clone, Serialize)]
pub struct DiffResult<'a> {
    pub key_column: usize,
    pub probe_provenance: &'a str,
    pub indexed_provenance: &'a str,
    pub probe_rows: usize,
    pub indexed_rows: usize,
    pub missing: Vec<RowRecord<'a>>,
    pub differing: Vec<DifferingPair<'a>>,
    pub equal: Vec<RecordPair<'a>>,
}

impl<'a> DiffResult<'a> {
    pub fn has_changes(&self) -> bool {
        !self.missing.is_empty() || !self.differing.is_empty()
    }

    pub fn total_deltas(&self) -> usize {
        self.differing.iter().map(|d| d.deltas.len()).sum()
    }
}

/// Field-level differences between two rows of equal length, in ascending index order
pub fn delta<'a>(left: &RowRecord<'a>, right: &RowRecord<'a>) -> Result<Vec<FieldDelta<'a>>> {
    if left.fields.len() != right.fields.len() {
        return Err(CsvDiffError::LengthMismatch {
            key: left.key.to_string(),
            left_provenance: left.provenance.to_string(),
            left_len: left.fields.len(),
            right_provenance: right.provenance.to_string(),
            right_len: right.fields.len(),
        });
    }
    Ok(shared_prefix_delta(left, right))
}

fn shared_prefix_delta<'a>(left: &RowRecord<'a>, right: &RowRecord<'a>) -> Vec<FieldDelta<'a>> {
    left.fields
        .iter()
        .zip(right.fields.iter())
        .enumerate()
        .filter(|(_, (l, r))| l != r)
        .map(|(index, (l, r))| FieldDelta {
            index,
            header: left.header_at(index),
            left_value: l.as_str(),
            right_value: r.as_str(),
            left_provenance: left.provenance,
            right_provenance: right.provenance,
        })
        .collect()
}

/// Diff engine: indexes the larger dataset and probes it with the smaller one
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Pick (probe, indexed). The dataset with fewer rows is probed; on a tie
    /// the first argument is probed and the second is indexed.
    pub fn select_roles<'d>(first: &'d Dataset, second: &'d Dataset) -> (&'d Dataset, &'d Dataset) {
        if second.row_count() < first.row_count() {
            (second, first)
        } else {
            (first, second)
        }
    }

    /// Compare two datasets by key
    pub fn diff<'a>(&self, first: &'a Dataset, second: &'a Dataset) -> Result<DiffResult<'a>> {
        let key_column = self.options.key_column;
        let (probe, indexed) = Self::select_roles(first, second);
        log::debug!(
            "Probing '{}' ({} rows) against index of '{}' ({} rows)",
            probe.provenance,
            probe.row_count(),
            indexed.provenance,
            indexed.row_count()
        );

        let index = KeyIndex::build(indexed, key_column)?;

        let mut missing = Vec::new();
        let mut differing_pairs = Vec::new();
        let mut equal = Vec::new();

        for position in 0..probe.row_count() {
            let record = RowRecord::from_row(probe, position, key_column)?;
            match index.classify(&record) {
                Classification::Missing => missing.push(record),
                Classification::Equal(other) => equal.push(RecordPair {
                    probe: record,
                    indexed: other,
                }),
                Classification::Differing(other) => differing_pairs.push(RecordPair {
                    probe: record,
                    indexed: other,
                }),
            }
        }

        let differing = differing_pairs
            .into_iter()
            .map(|pair| self.describe(pair))
            .collect::<Result<Vec<_>>>()?;

        Ok(DiffResult {
            key_column,
            probe_provenance: &probe.provenance,
            indexed_provenance: &indexed.provenance,
            probe_rows: probe.row_count(),
            indexed_rows: indexed.row_count(),
            missing,
            differing,
            equal,
        })
    }

    fn describe<'a>(&self, pair: RecordPair<'a>) -> Result<DifferingPair<'a>> {
        let left_len = pair.probe.fields.len();
        let right_len = pair.indexed.fields.len();

        if left_len == right_len || self.options.length_mismatch == LengthMismatchPolicy::Fail {
            return Ok(DifferingPair {
                deltas: delta(&pair.probe, &pair.indexed)?,
                pair,
                length_mismatch: None,
            });
        }

        Ok(DifferingPair {
            deltas: shared_prefix_delta(&pair.probe, &pair.indexed),
            pair,
            length_mismatch: Some(LengthMismatch { left_len, right_len }),
        })
    }
}
