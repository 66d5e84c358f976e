//! Console and log file output
//!
//! Two `fmt` layers share one filter setting: a compact colored console
//! layer on stderr and a plain timestamped layer appending to the log file.
//! Events with the `FILE_ONLY_TARGET` target skip the console.

use crate::error::{Result, SmTagError};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{filter, fmt, prelude::*, EnvFilter};

/// Target for events the console already shows in its own form
pub const FILE_ONLY_TARGET: &str = "sm_tagger::file_only";

fn env_filter(verbose: bool) -> EnvFilter {
    let default_directive = if verbose {
        "sm_tagger=debug"
    } else {
        "sm_tagger=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber; the log file is created or appended to
pub fn init_logging(log_file: &Path, verbose: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            SmTagError::ConfigError(format!(
                "Cannot open log file {}: {}",
                log_file.display(),
                e
            ))
        })?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(env_filter(verbose))
        .with_filter(filter::filter_fn(|meta| meta.target() != FILE_ONLY_TARGET));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(env_filter(verbose));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SmTagError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

/// Record a fatal error in the log file; `main` prints it to the console
pub fn log_fatal(error: &SmTagError) {
    tracing::error!(target: FILE_ONLY_TARGET, "{}", error);
}
