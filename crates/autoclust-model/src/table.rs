#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::{ColumnMetaMap, ModelError, Result};

/// One table cell: either a textual value or an absent one.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    /// Build a cell from a raw field, treating empty fields and fields equal
    /// to `missing_marker` as absent.
    pub fn from_raw(raw: &str, missing_marker: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || (!missing_marker.is_empty() && trimmed == missing_marker) {
            Self::Missing
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Attempt a 64-bit float reading of the cell; `None` when missing or
    /// not numeric.
    pub fn parse_f64(&self) -> Option<f64> {
        self.as_text().and_then(|value| value.parse::<f64>().ok())
    }
}

/// One row: identifier plus cells positional against the dataset's columns.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataRow {
    pub id: String,
    pub cells: Vec<CellValue>,
}

/// A row-aligned table with an identifier column and per-column metadata.
///
/// Invariants: column names are unique, every data column has exactly one
/// metadata entry, and every row carries one cell per column.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    /// File the dataset was loaded from; empty for merged datasets.
    pub source: PathBuf,
    /// Name of the row-identifier column (never part of `columns`).
    pub row_id_name: String,
    /// Data column names, in input order.
    pub columns: Vec<String>,
    pub rows: Vec<DataRow>,
    pub column_meta: ColumnMetaMap,
}

impl Dataset {
    pub fn new(
        source: impl Into<PathBuf>,
        row_id_name: impl Into<String>,
        columns: Vec<String>,
    ) -> Self {
        Self {
            source: source.into(),
            row_id_name: row_id_name.into(),
            columns,
            rows: Vec::new(),
            column_meta: ColumnMetaMap::new(),
        }
    }

    /// Append a row, enforcing the one-cell-per-column invariant.
    pub fn push_row(&mut self, row: DataRow) -> Result<()> {
        if row.cells.len() != self.columns.len() {
            return Err(ModelError::RowWidthMismatch {
                id: row.id,
                cells: row.cells.len(),
                columns: self.columns.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of data columns (the identifier column is not counted).
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Rename a data column, moving its metadata atomically.
    ///
    /// Returns false when `old` is absent or `new` already exists.
    pub fn rename_column(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.column_index(old).is_some();
        }
        if self.column_index(new).is_some() {
            return false;
        }
        let Some(idx) = self.column_index(old) else {
            return false;
        };
        if !self.column_meta.rename(old, new) {
            return false;
        }
        self.columns[idx] = new.to_string();
        true
    }

    /// Cells of one data column, top to bottom.
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().map(move |row| &row.cells[idx])
    }

    /// Count of distinct non-missing values in a data column.
    pub fn distinct_count(&self, idx: usize) -> usize {
        let values: BTreeSet<&str> = self
            .column_cells(idx)
            .filter_map(CellValue::as_text)
            .collect();
        values.len()
    }

    /// Minimum over the numeric readings of a data column, missing and
    /// non-numeric cells skipped.
    pub fn numeric_min(&self, idx: usize) -> Option<f64> {
        self.column_cells(idx)
            .filter_map(CellValue::parse_f64)
            .fold(None, |acc, value| match acc {
                Some(current) if current <= value => Some(current),
                _ => Some(value),
            })
    }
}
