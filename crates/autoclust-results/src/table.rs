//! Reloading the prepared data table for aggregation.

use std::path::Path;

use autoclust_model::CellValue;
use tracing::info;

use crate::error::{Result, ResultsError};

/// The prepared table as written alongside the classifier's data file:
/// tab-separated, header row, first column identifier, empty cell missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTable {
    pub row_id_name: String,
    /// Experiment (data) column names, in table order.
    pub experiment_names: Vec<String>,
    pub ids: Vec<String>,
    /// One cell row per identifier, positional against `experiment_names`.
    pub rows: Vec<Vec<CellValue>>,
}

impl PreparedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Load the prepared `.tsv` companion back into memory.
pub fn load_prepared_table(path: &Path) -> Result<PreparedTable> {
    info!("Aggregating input data from '{}'", path.display());
    if !path.exists() {
        return Err(ResultsError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ResultsError::TableParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let headers = reader
        .headers()
        .map_err(|e| ResultsError::TableParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();
    let mut fields = headers.iter();
    let row_id_name = fields.next().unwrap_or_default().to_string();
    let experiment_names: Vec<String> = fields.map(String::from).collect();

    let mut ids = Vec::new();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ResultsError::TableParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut values = record.iter();
        ids.push(values.next().unwrap_or_default().to_string());
        let mut cells: Vec<CellValue> = values.map(|raw| CellValue::from_raw(raw, "")).collect();
        cells.resize(experiment_names.len(), CellValue::Missing);
        rows.push(cells);
    }

    Ok(PreparedTable {
        row_id_name,
        experiment_names,
        ids,
        rows,
    })
}
