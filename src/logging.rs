//! File-based tracing setup. The terminal is in raw mode while the game runs,
//! so log lines go to a file instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use tracing_subscriber::EnvFilter;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".shucks";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "shucks.log";
/// Environment variable holding an `EnvFilter` directive.
const LOG_ENV: &str = "SHUCKS_LOG";

/// Install the global subscriber and return the path being written to.
pub fn init(log_file: Option<&Path>, debug: bool) -> Result<PathBuf> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => default_log_path()?,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let fallback = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

    Ok(path)
}

/// Resolve the log path inside the user's home.
fn default_log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}
