//! Locating the external classifier binary.

use std::env;
use std::path::PathBuf;
use std::process::Command;

use tracing::{error, info};

const BINARY_NAME: &str = "autoclass";

/// Search the executable search path for the `autoclass` binary.
///
/// Absence is an observable condition for callers to handle, not an
/// internal failure: the pipeline's own artifacts are valid either way.
pub fn find_autoclass() -> Option<PathBuf> {
    let found = env::var_os("PATH").and_then(|path_var| {
        env::split_paths(&path_var)
            .map(|dir| dir.join(BINARY_NAME))
            .find(|candidate| candidate.is_file())
    });
    match &found {
        Some(path) => info!("AutoClass C executable found in {}", path.display()),
        None => error!("AutoClass C executable not found in path!"),
    }
    found
}

/// Version banner of the `autoclass` binary, empty when unavailable.
///
/// The bare executable prints its version text; spawn failures are logged
/// and collapse to an empty banner rather than an error, since the binary
/// is an external collaborator.
pub fn autoclass_version() -> String {
    if find_autoclass().is_none() {
        return String::new();
    }
    match Command::new(BINARY_NAME).output() {
        Ok(output) => {
            let banner = String::from_utf8_lossy(&output.stdout).trim().to_string();
            info!("AutoClass C version: {banner}");
            banner
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            error!("AutoClass C is in PATH but is not executable");
            String::new()
        }
        Err(_) => {
            error!("AutoClass C is in PATH but cannot be run");
            String::new()
        }
    }
}
