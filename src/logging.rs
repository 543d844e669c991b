//! Tracing subscriber setup.
//!
//! The terminal reader owns the screen, so while it runs logs go to the configured file or
//! nowhere. Non-interactive output logs to stderr. The filter comes from `WAYMARK_LOG`.

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "WAYMARK_LOG";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where log lines go.
pub enum LogTarget<'a> {
    /// Append to a file.
    File(&'a str),
    /// Write to standard error.
    Stderr,
    /// Install nothing.
    Disabled,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber for `target`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is already installed.
pub fn init(target: LogTarget<'_>) -> Result<()> {
    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| Error::Logging(e.to_string())),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| Error::Logging(e.to_string()))
        }
    }
}
