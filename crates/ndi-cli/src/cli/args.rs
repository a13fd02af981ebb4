//! Command-line argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::logging::OutputLevel;
use crate::output::OutputFormat;

/// Compliance analysis for Cisco Nexus Dashboard Insights
///
/// Reports smart events, severity breakdown, unhealthy resources, compliance
/// score, event count and per-requirement results for one snapshot of a
/// fabric. Every command is read-only.
#[derive(Parser, Debug)]
#[command(name = "ndi")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Nexus Dashboard host name, address or URL
    #[arg(long, env = "ND_HOST", global = true)]
    pub host: Option<String>,

    /// Nexus Dashboard port
    #[arg(long, env = "ND_PORT", global = true)]
    pub port: Option<u16>,

    /// Account name
    #[arg(short, long, env = "ND_USERNAME", global = true)]
    pub username: Option<String>,

    /// Account password (prompted for when missing on a terminal)
    #[arg(short, long, env = "ND_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// API key, used instead of a password
    #[arg(long, env = "ND_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Login domain for password authentication
    #[arg(long, env = "ND_LOGIN_DOMAIN", global = true)]
    pub login_domain: Option<String>,

    /// Use plain HTTP instead of HTTPS
    #[arg(long, global = true)]
    pub no_ssl: bool,

    /// Do not validate the server certificate
    #[arg(long, global = true)]
    pub no_validate_certs: bool,

    /// Ignore proxy environment variables
    #[arg(long, global = true)]
    pub no_proxy: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum requests per second sent to the dashboard
    #[arg(long, env = "ND_RATE_LIMIT", global = true)]
    pub rate_limit: Option<u32>,

    /// Config file (default: the platform config directory)
    #[arg(long, env = "NDI_CONFIG", global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Baseline amount of diagnostic output on stderr
    #[arg(long, global = true, value_enum)]
    pub output_level: Option<OutputLevel>,

    /// Explain what this command does before running it
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Query compliance analysis data for a snapshot
    #[command(visible_alias = "analyze")]
    Compliance(ComplianceArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Compliance command
// ============================================================================

#[derive(Args, Debug)]
pub struct ComplianceArgs {
    /// Insights group (only meaningful before NDI 6.3; later versions use "default")
    #[arg(long, visible_aliases = ["ig-name", "fab-name"])]
    pub insights_group: Option<String>,

    /// Fabric name
    #[arg(
        long,
        visible_aliases = ["site", "site-name", "fabric-name"],
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub fabric: String,

    /// Snapshot (epoch) to analyse; the latest finished one when omitted
    #[arg(long, visible_alias = "epoch-id")]
    pub snapshot_id: Option<String>,

    /// Check mode; the analysis is read-only so results are identical
    #[arg(long)]
    pub check: bool,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Value to set
        value: String,
    },

    /// Remove a configuration value
    Unset {
        /// Configuration key
        key: String,
    },

    /// Show config file path
    Path,
}
