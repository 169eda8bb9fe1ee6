//! Delimited-table loading with declared column semantics.

use std::path::Path;

use autoclust_model::{CellValue, ColumnMeta, DataRow, Dataset, SemanticType};
use tracing::{debug, info, warn};

use crate::encoding;
use crate::error::{IngestError, Result};
use crate::names::{check_unique_names, sanitize_name};
use crate::validate::{check_data_type, scan_missing_values};

/// How one input table is read and typed.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Declared semantic type stamped on every data column.
    pub semantic_type: SemanticType,
    /// Declared error magnitude for continuous columns.
    pub error: Option<f64>,
    /// Field separator of the input file.
    pub separator: u8,
    /// Marker encoding missing data in the input file (empty cells are
    /// always treated as missing).
    pub missing: String,
}

impl LoadOptions {
    pub fn new(semantic_type: SemanticType) -> Self {
        Self {
            semantic_type,
            error: Some(0.01),
            separator: b'\t',
            missing: String::new(),
        }
    }

    pub fn with_error(mut self, error: Option<f64>) -> Self {
        self.error = error;
        self
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_missing(mut self, missing: impl Into<String>) -> Self {
        self.missing = missing.into();
        self
    }
}

/// Load one delimited table as a [`Dataset`].
///
/// The first row is the header, the first column is the row identifier;
/// every other column becomes a data column stamped with the declared
/// type and error. The full cleaning/validation phase runs before the
/// dataset is returned: header duplicate check, encoding detection, name
/// sanitation, declared-type check and missing-value scan.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let mut message = format!(
        "Reading data file '{}' as '{}'",
        path.display(),
        options.semantic_type
    );
    if options.semantic_type.is_real() {
        if let Some(error) = options.error {
            message.push_str(&format!(" with error {error}"));
        }
    }
    info!("{message}");

    if !path.exists() {
        return Err(IngestError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }
    let (text, detected) = encoding::read_to_string(path)?;
    info!("Detected encoding: {}", detected.name());

    // Duplicate header names abort before any parsing work.
    check_header_duplicates(path, &text, options.separator)?;

    let mut dataset = parse_table(path, &text, options)?;
    info!(
        "Found {} rows and {} columns",
        dataset.row_count(),
        dataset.column_count() + 1
    );

    clean_column_names(&mut dataset)?;
    check_data_type(&dataset)?;
    scan_missing_values(&mut dataset);
    Ok(dataset)
}

/// Fail-fast duplicate check on the raw header line, before the csv parse.
fn check_header_duplicates(path: &Path, text: &str, separator: u8) -> Result<()> {
    let header_line = text.lines().next().ok_or_else(|| IngestError::EmptyFile {
        path: path.to_path_buf(),
    })?;
    let names: Vec<String> = header_line
        .trim_end()
        .split(separator as char)
        .map(|field| field.trim().to_string())
        .collect();
    check_unique_names(&names)
}

fn parse_table(path: &Path, text: &str, options: &LoadOptions) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.separator)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();
    let mut fields = headers.iter().map(str::trim);
    let row_id_name = fields
        .next()
        .ok_or_else(|| IngestError::EmptyFile {
            path: path.to_path_buf(),
        })?
        .to_string();
    let columns: Vec<String> = fields.map(String::from).collect();

    let mut dataset = Dataset::new(path, row_id_name, columns);
    for name in dataset.columns.clone() {
        dataset
            .column_meta
            .insert(name, ColumnMeta::new(options.semantic_type, options.error));
    }

    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if record.len() != dataset.column_count() + 1 {
            return Err(IngestError::RaggedRow {
                path: path.to_path_buf(),
                row: idx + 2,
                cells: record.len(),
                columns: dataset.column_count() + 1,
            });
        }
        let mut values = record.iter();
        let id = values.next().unwrap_or_default().trim().to_string();
        let cells: Vec<CellValue> = values
            .map(|raw| CellValue::from_raw(raw, &options.missing))
            .collect();
        dataset.push_row(DataRow { id, cells }).map_err(|e| {
            IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
    }
    Ok(dataset)
}

/// Sanitize the identifier and data column names, rekeying metadata.
///
/// One rename notice is emitted per changed name. Sanitation that collapses
/// two distinct names onto the same cleaned name is a duplicate-header
/// error, surfaced here instead of losing a metadata entry.
fn clean_column_names(dataset: &mut Dataset) -> Result<()> {
    debug!("Checking column names");
    let cleaned: Vec<String> = dataset.columns.iter().map(|c| sanitize_name(c)).collect();
    check_unique_names(&cleaned)?;

    let row_id_name = dataset.row_id_name.clone();
    let cleaned_id = sanitize_name(&row_id_name);
    if cleaned_id != row_id_name {
        warn!("Column '{row_id_name}' renamed to '{cleaned_id}'");
        dataset.row_id_name = cleaned_id;
    }
    for old in dataset.columns.clone() {
        let new = sanitize_name(&old);
        if new != old {
            dataset.rename_column(&old, &new);
            warn!("Column '{old}' renamed to '{new}'");
        }
    }
    debug!("Index name '{}'", dataset.row_id_name);
    for name in &dataset.columns {
        debug!("Column name '{name}'");
    }
    Ok(())
}
