//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.output_level.unwrap_or_default(), cli.verbose, cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_path = Config::path(cli.config.as_deref())?;
    let config = Config::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    let output_format = cli.output.or(config.output_format).unwrap_or_default();

    let settings = commands::Settings {
        host: cli.host.or_else(|| config.host.clone()),
        port: cli.port.or(config.port),
        username: cli.username.or_else(|| config.username.clone()),
        password: cli.password,
        api_key: cli.api_key.or_else(|| config.api_key.clone()),
        login_domain: cli.login_domain.or_else(|| config.login_domain.clone()),
        use_ssl: !cli.no_ssl && config.use_ssl.unwrap_or(true),
        validate_certs: !cli.no_validate_certs && config.validate_certs.unwrap_or(true),
        use_proxy: !cli.no_proxy && config.use_proxy.unwrap_or(true),
        timeout: cli.timeout.or(config.timeout),
        rate_limit: cli.rate_limit.or(config.rate_limit),
        insights_group: config.insights_group.clone(),
    };

    // Create context for commands
    let ctx = commands::Context {
        settings,
        config_path,
        output_format,
        explain: cli.explain,
        no_color: cli.no_color,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Compliance(args) => commands::compliance::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(&ctx, args),
    }
}
