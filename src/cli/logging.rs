//! Run log, appended to `<workDir>/log.txt`.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use super::args::LogLevel;

pub const LOG_FILE_NAME: &str = "log.txt";

/// Install the global subscriber writing to the run log.
///
/// Only this crate's events are recorded. A subscriber that is already
/// installed is kept, and the new log file then receives nothing.
pub fn init_logging(work_dir: &Path, level: LogLevel) -> Result<PathBuf> {
    fs::create_dir_all(work_dir)
        .with_context(|| format!("Failed to create work directory: {:?}", work_dir))?;

    let path = work_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    let filter = EnvFilter::new(format!("fstransfer={}", level.as_str()));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(
            "Run log {} not attached, a subscriber is already installed: {}",
            path.display(),
            err
        );
    }

    Ok(path)
}
