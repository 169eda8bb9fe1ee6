//! Error types for artifact generation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    /// A `real scalar` column holds a negative minimum, incompatible with
    /// the fixed 0.0 zero-point written to the attribute descriptor.
    #[error("min value for {column} should be >= 0.0, found {min}")]
    InvalidRange { column: String, min: f64 },

    /// A data column has no metadata entry (broken dataset invariant).
    #[error("no metadata for column '{column}'")]
    MissingMeta { column: String },

    /// Failed to write an artifact.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DescriptorError>;
