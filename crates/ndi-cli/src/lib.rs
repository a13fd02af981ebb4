//! # ndi-cli
//!
//! Command-line interface for Cisco Nexus Dashboard Insights compliance analysis.
//!
//! ## Features
//!
//! - **Compliance analysis**: smart events, severity breakdown, unhealthy
//!   resources, score, count and per-requirement results for one snapshot
//! - **Snapshot resolution**: the latest finished snapshot is used unless one is given
//! - **Explain mode**: `--explain` lists the requests a command will make
//! - **Multiple output formats**: JSON, YAML, pretty tables
//! - **Config file**: connection defaults in TOML

pub mod cli;
pub mod config;
pub mod education;
pub mod logging;
pub mod output;

pub use cli::run;
