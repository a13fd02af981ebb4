//! `ndi config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::{Config, KEYS};
use crate::education::Explain;
use crate::output;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value),
        ConfigCommands::Unset { key } => unset_config(ctx, &key),
        ConfigCommands::Path => show_path(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.explain {
        Explain::config_show().print();
    }

    let config = Config::load(&ctx.config_path)?.masked();

    if let Some(rendered) = output::render(&config, ctx.output_format)? {
        println!("{rendered}");
        return Ok(());
    }

    println!("{}", "Current Configuration:".bold());
    println!();

    let value = serde_json::to_value(&config)?;
    for (key, _) in KEYS {
        let display = match value.get(*key) {
            Some(serde_json::Value::Null) | None => "(not set)".dimmed().to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        println!("  {} {}", format!("{key}:").bold(), display);
    }

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load(&ctx.config_path)?;
    config.set(key, value)?;
    config.save(&ctx.config_path)?;

    let shown = if key == "api_key" {
        crate::config::mask(value)
    } else {
        value.to_string()
    };
    eprintln!("{} {} set to {}.", "Success:".green().bold(), key, shown.cyan());

    Ok(())
}

fn unset_config(ctx: &Context, key: &str) -> Result<()> {
    let mut config = Config::load(&ctx.config_path)?;
    config.unset(key)?;
    config.save(&ctx.config_path)?;

    eprintln!("{} {} removed.", "Success:".green().bold(), key);
    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.config_path.display());
    Ok(())
}
