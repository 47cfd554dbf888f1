//! File logging for QueryDesk
//!
//! The terminal belongs to the TUI, so log output goes to a file. Call sites use
//! the `tracing` macros directly; this module only installs the subscriber.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;

/// Default log file path (same directory as executable)
pub fn default_log_path() -> PathBuf {
    crate::config::exe_dir().join("querydesk.log")
}

/// Initialize the global logger.
///
/// Fails when the file cannot be opened or a subscriber is already installed.
/// Callers treat a failure as "logging disabled" rather than aborting.
pub fn init(path: &Path, verbose: bool) -> crate::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(path)?;

    let level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| crate::QueryDeskError::Logging(e.to_string()))?;

    tracing::info!(log_file = %path.display(), "logging initialised");
    Ok(())
}
