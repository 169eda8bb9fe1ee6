//! Run-script emission and outcome markers.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, RunError};

/// Marker file touched by the run script on success.
pub const SUCCESS_MARKER: &str = "autoclass-run-success";
/// Marker file touched by the run script on failure.
pub const FAILURE_MARKER: &str = "autoclass-run-failure";

/// Write the shell script that drives the classifier.
///
/// The script runs the search phase over the prepared artifact family, then
/// the report phase over the search output, each phase redirected to its own
/// log file. The here-doc `y` acknowledges the warning the classifier emits
/// for reproducible runs. The report phase's exit status decides which
/// marker file is touched.
pub fn write_run_script(root: &Path) -> Result<PathBuf> {
    info!("Writing run file");
    let path = script_path(root);
    let root = root.display();
    let content = format!(
        "# the \"y\" parameter validates warning\n\
         # in case of a reproducible run\n\
         autoclass -search {root}.db2 {root}.hd2 {root}.model {root}.s-params >autoclass-search.log 2>&1 <<EOF\n\
         y\n\
         EOF\n\
         autoclass -reports {root}.results-bin {root}.search {root}.r-params >autoclass-report.log 2>&1\n\
         \n\
         if [ $? -eq 0 ]\n\
         then\n\
         \x20   touch {SUCCESS_MARKER}\n\
         else\n\
         \x20   touch {FAILURE_MARKER}\n\
         fi\n"
    );
    write_script(&path, &content)?;
    Ok(path)
}

/// Write a dummy script that stands in for the classifier in tests.
///
/// The script touches the `.log` file once per second for `seconds`
/// seconds, then touches the `.rlog` marker.
pub fn write_test_script(root: &Path, seconds: u32) -> Result<PathBuf> {
    info!("Writing dummy run file");
    let path = script_path(root);
    let root = root.display();
    let content = format!(
        "for a in $(seq 1 {seconds})\n\
         do\n\
         \x20   touch {root}.log\n\
         \x20   sleep 1\n\
         done\n\
         touch {root}.rlog\n"
    );
    write_script(&path, &content)?;
    Ok(path)
}

/// Outcome signaled by the marker files in `dir`, if the run finished.
pub fn run_status(dir: &Path) -> Option<bool> {
    if dir.join(SUCCESS_MARKER).exists() {
        Some(true)
    } else if dir.join(FAILURE_MARKER).exists() {
        Some(false)
    } else {
        None
    }
}

fn script_path(root: &Path) -> PathBuf {
    let mut name = root.to_path_buf().into_os_string();
    name.push(".sh");
    name.into()
}

fn write_script(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })
}
