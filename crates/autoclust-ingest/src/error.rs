//! Error types for tabular ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or merging input tables.
///
/// All variants describe user-input-data problems, not internal faults.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    MissingInputFile { path: PathBuf },

    /// Failed to read the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header row contains repeated column names.
    #[error(
        "found duplicate column names: {}\nplease clean your header",
        .names.join(" ")
    )]
    DuplicateColumnNames { names: Vec<String> },

    /// A continuous column holds a value that is not a 64-bit float.
    #[error("cannot cast column '{column}' to float: invalid value '{value}'")]
    NumericCast { column: String, value: String },

    /// A data row's field count differs from the header's.
    #[error("row {row} of {path} has {cells} fields, expected {columns}")]
    RaggedRow {
        path: PathBuf,
        row: usize,
        cells: usize,
        columns: usize,
    },

    /// The csv reader rejected the file.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The file holds no header line.
    #[error("input file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// `merge_datasets` was called with nothing to merge.
    #[error("no input datasets to merge")]
    NoInputDatasets,
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
