//! Source read logging
//!
//! Every source read is bracketed by a start and a completion line so slow
//! exports show up in the log with their row counts.

use std::path::Path;
use std::time::Duration;

/// Announce that a source is about to be read
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Report the rows a finished read produced, with its duration when measured
pub fn log_operation_complete(operation: &str, path: &Path, rows: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!("Finished: {operation} {rows} rows from {} in {duration:?}", path.display()),
        None => log::info!("Finished: {operation} {rows} rows from {}", path.display()),
    }
}

/// Warn about a data problem that does not stop the run, naming the source if known
pub fn log_warning(message: &str, source: Option<&Path>) {
    match source {
        Some(path) => log::warn!("{message} ({})", path.display()),
        None => log::warn!("{message}"),
    }
}
