//! Tabular ingestion for AutoClass C preparation.
//!
//! Loads delimited text tables with declared semantic column types into
//! [`autoclust_model::Dataset`] values and merges several of them into one
//! row-aligned table via an outer union. Encoding is detected per file
//! before parsing; column names are sanitized to the classifier's accepted
//! character set.

mod encoding;
mod error;
mod loader;
mod merge;
mod names;
mod validate;

pub use encoding::{detect_encoding, read_to_string};
pub use error::{IngestError, Result};
pub use loader::{LoadOptions, load_dataset};
pub use merge::merge_datasets;
pub use names::{check_unique_names, find_duplicates, sanitize_name};
pub use validate::{check_data_type, scan_missing_values};
