//! Key index over one dataset

use crate::data::Dataset;
use crate::error::{CsvDiffError, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// A row together with its key, position and origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowRecord<'a> {
    pub key: &'a str,
    /// Zero-based position among the data rows (header excluded)
    pub position: usize,
    pub fields: &'a [String],
    pub provenance: &'a str,
    #[serde(skip)]
    pub headers: Option<&'a [String]>,
}

impl<'a> RowRecord<'a> {
    /// Wrap the row at `position`, failing when it has no field at `key_column`
    pub(crate) fn from_row(dataset: &'a Dataset, position: usize, key_column: usize) -> Result<Self> {
        let fields = dataset.rows[position].as_slice();
        let key = fields
            .get(key_column)
            .ok_or_else(|| CsvDiffError::InsufficientColumns {
                provenance: dataset.provenance.clone(),
                row: position,
                key_column,
                found: fields.len(),
            })?;

        Ok(Self {
            key: key.as_str(),
            position,
            fields,
            provenance: &dataset.provenance,
            headers: dataset.header_slice(),
        })
    }

    /// Header name at `index`, if the dataset had one at that position
    pub fn header_at(&self, index: usize) -> Option<&'a str> {
        self.headers
            .and_then(|headers| headers.get(index))
            .map(String::as_str)
    }
}

/// Outcome of probing the index with one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Missing,
    Equal(RowRecord<'a>),
    Differing(RowRecord<'a>),
}

/// Unique mapping from key to row record
#[derive(Debug)]
pub struct KeyIndex<'a> {
    key_column: usize,
    records: IndexMap<&'a str, RowRecord<'a>>,
}

impl<'a> KeyIndex<'a> {
    /// Index every row of `dataset` by the value at `key_column`
    pub fn build(dataset: &'a Dataset, key_column: usize) -> Result<Self> {
        let mut records: IndexMap<&'a str, RowRecord<'a>> =
            IndexMap::with_capacity(dataset.row_count());

        for position in 0..dataset.row_count() {
            let record = RowRecord::from_row(dataset, position, key_column)?;
            if let Some(existing) = records.get(record.key) {
                return Err(CsvDiffError::DuplicateKey {
                    provenance: dataset.provenance.clone(),
                    key: record.key.to_string(),
                    first_row: existing.position,
                    row: position,
                });
            }
            records.insert(record.key, record);
        }

        log::debug!(
            "Indexed {} rows of '{}' on column {}",
            records.len(),
            dataset.provenance,
            key_column
        );

        Ok(Self {
            key_column,
            records,
        })
    }

    pub fn get(&self, key: &str) -> Option<&RowRecord<'a>> {
        self.records.get(key)
    }

    /// Classify a record from the other dataset against this index
    pub fn classify(&self, record: &RowRecord<'_>) -> Classification<'a> {
        match self.records.get(record.key) {
            None => Classification::Missing,
            Some(indexed) if indexed.fields == record.fields => Classification::Equal(*indexed),
            Some(indexed) => Classification::Differing(*indexed),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn key_column(&self) -> usize {
        self.key_column
    }
}
