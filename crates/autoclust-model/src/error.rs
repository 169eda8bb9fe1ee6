use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Semantic type string not recognized.
    #[error(
        "unknown semantic type '{0}': expected 'real scalar', 'real location', 'discrete' or 'merged'"
    )]
    UnknownSemanticType(String),

    /// Column name already present in the dataset.
    #[error("column '{0}' already exists")]
    ColumnExists(String),

    /// Row cell count does not match the dataset's column count.
    #[error("row '{id}' has {cells} cells, expected {columns}")]
    RowWidthMismatch {
        id: String,
        cells: usize,
        columns: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
