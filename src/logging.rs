use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const LOG_FILE_NAME: &str = "dashboard.log";
const DEFAULT_FILTER: &str = "openlibrary_dashboard=info";

/// Route `tracing` output to a log file. The terminal belongs to the TUI while
/// it runs, so nothing is written to stdout or stderr. `RUST_LOG` overrides
/// the default filter.
pub fn init_logging(config: &Config) -> Result<PathBuf> {
    let dir = config.resolve_log_dir()?;
    fs::create_dir_all(&dir).context("failed to create log directory")?;

    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

    Ok(path)
}
