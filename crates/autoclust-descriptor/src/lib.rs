//! Deterministic AutoClass C input artifacts.
//!
//! Given a merged [`autoclust_model::Dataset`], this crate emits the file
//! family the classifier consumes: the header-less data file (`.db2`) with
//! its re-readable `.tsv` companion, the attribute descriptor (`.hd2`), the
//! statistical model descriptor (`.model`), search parameters (`.s-params`)
//! and report parameters (`.r-params`). Every artifact is composed fully in
//! memory and written in one step, so a failed stage never leaves a partial
//! file; re-invoking with the same root overwrites cleanly.

mod error;
mod params;
mod writer;

pub use error::{DescriptorError, Result};
pub use params::SearchParams;
pub use writer::ArtifactWriter;
