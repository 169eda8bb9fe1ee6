//! Boundary artifacts around the external AutoClass C executable.
//!
//! The pipeline itself never drives the classifier; it hands over a shell
//! script that runs the search phase then the report phase and signals the
//! outcome through marker files. This crate emits that script, plus a dummy
//! variant for tests, and locates the `autoclass` executable on the search
//! path to read its version banner.

mod discover;
mod error;
mod script;

pub use discover::{autoclass_version, find_autoclass};
pub use error::{Result, RunError};
pub use script::{
    FAILURE_MARKER, SUCCESS_MARKER, run_status, write_run_script, write_test_script,
};
