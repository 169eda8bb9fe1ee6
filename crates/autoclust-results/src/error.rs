//! Error types for result reconstruction.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultsError {
    /// Result or data file does not exist.
    #[error("input file not found: {path}")]
    MissingInputFile { path: PathBuf },

    /// Failed to read an input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A case record does not follow `caseId (classId prob)+`.
    #[error("malformed case record on line {line_number}: '{line}'")]
    MalformedRecord { line_number: usize, line: String },

    /// Case count does not match the prepared table's row count.
    #[error(
        "number of cases found in results ({cases}) should match number of rows in input data ({rows})"
    )]
    ShapeMismatch { cases: usize, rows: usize },

    /// The prepared data table could not be parsed.
    #[error("failed to parse {path}: {message}")]
    TableParse { path: PathBuf, message: String },

    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ResultsError>;
