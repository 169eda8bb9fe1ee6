//! Core data model for AutoClass C data preparation.
//!
//! This crate defines the table model shared by the ingestion, descriptor
//! and result-reconstruction stages: semantic column types, per-column
//! metadata with an order-preserving map, and the row-aligned [`Dataset`].
//! It performs no I/O.

mod error;
mod meta;
mod table;
mod types;

pub use error::{ModelError, Result};
pub use meta::ColumnMetaMap;
pub use table::{CellValue, DataRow, Dataset};
pub use types::{ColumnMeta, SemanticType};
