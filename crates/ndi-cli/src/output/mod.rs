//! Output formatting for different formats.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output
    #[default]
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed tables with colors
    Pretty,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "pretty" | "table" => Ok(Self::Pretty),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: json, yaml, pretty",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

/// Serialize `value` as JSON or YAML.
///
/// Returns `None` for [`OutputFormat::Pretty`], which each command renders itself.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<Option<String>> {
    Ok(match format {
        OutputFormat::Json => Some(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Some(serde_yaml::to_string(value)?),
        OutputFormat::Pretty => None,
    })
}

/// Whether the command renders its own human-readable output
pub const fn is_pretty(format: OutputFormat) -> bool {
    matches!(format, OutputFormat::Pretty)
}

/// One-line description of a JSON payload's size
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Array(items) => format!("{} item(s)", items.len()),
        Value::Object(fields) => format!("{} field(s)", fields.len()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
