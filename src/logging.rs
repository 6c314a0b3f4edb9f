//! `tracing` subscriber setup.
//!
//! Headless commands log to stderr. The interactive page owns the terminal,
//! so it logs to `TELETEST_LOG_FILE` when set and nowhere otherwise.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

fn filter(settings: &LogSettings, verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("teletest=debug")
    } else {
        EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Log to stderr
pub fn init_stderr(settings: &LogSettings, verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(settings, verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to the configured file, or discard when none is configured
pub fn init_for_tui(settings: &LogSettings, verbose: bool) -> std::io::Result<()> {
    match settings.file.as_deref() {
        Some(path) => init_file(path, settings, verbose),
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter(settings, verbose))
                .with_writer(std::io::sink)
                .try_init();
            Ok(())
        }
    }
}

fn init_file(path: &Path, settings: &LogSettings, verbose: bool) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(settings, verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
