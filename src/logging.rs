//! Logging setup: stdout for the scheduler console, plus a per-run log file.

use chrono::Local;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global subscriber.
///
/// Writes to stdout and to `logs_dir/fiew_bot_<YYYYMMDD_HHMMSS>.log` (ANSI
/// stripped), filtered by `RUST_LOG` with an `info` default. The logs
/// directory is created on demand. Returns the log file path so the caller
/// can announce it.
pub fn init(logs_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(logs_dir)?;
    let log_path = logs_dir.join(format!(
        "fiew_bot_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let log_file = File::create(&log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().compact().with_writer(io::stdout);
    let file_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(log_path)
}
