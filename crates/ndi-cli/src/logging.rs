//! Diagnostic logging to stderr.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Baseline amount of diagnostic output
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputLevel {
    /// Warnings and errors only
    #[default]
    Normal,
    /// Progress of each run
    Info,
    /// Every request made
    Debug,
}

/// The filter directive for a baseline level raised by `-v` flags
pub fn directive(level: OutputLevel, verbose: u8) -> &'static str {
    let base = match level {
        OutputLevel::Normal => 0,
        OutputLevel::Info => 1,
        OutputLevel::Debug => 2,
    };

    match base.max(verbose) {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence when set.
pub fn init(level: OutputLevel, verbose: u8, no_color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(level, verbose)));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init();
}
