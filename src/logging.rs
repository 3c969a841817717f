//! Tracing subscriber setup.
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it logs to a file
//! when one is given and discards log output otherwise.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Discard,
}

/// Build the level filter: `RUST_LOG` wins over the `--log-level` flag.
pub fn build_filter(default_level: &str) -> Result<EnvFilter, AppError> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(spec) if !spec.trim().is_empty() => EnvFilter::try_new(spec)
            .map_err(|e| AppError::config(format!("Invalid RUST_LOG filter: {e}"))),
        _ => EnvFilter::try_new(default_level)
            .map_err(|e| AppError::config(format!("Invalid log level '{default_level}': {e}"))),
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(default_level: &str, target: LogTarget<'_>) -> Result<(), AppError> {
    let filter = build_filter(default_level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::io(format!("Failed to open log file '{}': {e}", path.display())))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        LogTarget::Discard => builder.with_writer(std::io::sink).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
    Ok(())
}
