//! AutoClass C result reconstruction.
//!
//! Parses the classifier's per-case classification output, joins it back
//! onto the prepared table, and derives the analyst-facing outputs: the
//! class-sorted table, the `.cdt` visualization matrix and the per-cluster
//! mean/standard-deviation summary.

mod aggregate;
mod error;
mod parser;
mod table;

pub use aggregate::{
    ClassifiedRow, ClassifiedTable, aggregate, export_results, write_cdt, write_cluster_stats,
};
pub use error::{Result, ResultsError};
pub use parser::{CaseClassification, CaseResults, parse_case_results, read_case_results};
pub use table::{PreparedTable, load_prepared_table};
