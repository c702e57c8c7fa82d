use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub(crate) const LOG_FILE: &str = "findash.log";

/// Where log records go. The TUI owns the terminal, so it logs to a file.
pub(crate) enum LogTarget {
    File(PathBuf),
    Stderr,
}

pub(crate) fn init(target: LogTarget, filter: &str) -> Result<()> {
    let mut builder = Builder::new();
    builder.parse_filters(filter);
    if let LogTarget::File(dir) = target {
        let file = open_log_file(&dir)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.format_timestamp_secs();
    builder
        .try_init()
        .context("Failed to initialise logging")?;
    Ok(())
}

/// Open (append) the log file inside `dir`.
pub(crate) fn open_log_file(dir: &Path) -> Result<File> {
    let path = dir.join(LOG_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}
