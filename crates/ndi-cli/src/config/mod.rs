//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration: connection defaults for the Nexus Dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Nexus Dashboard host name, address or URL.
    pub host: Option<String>,

    /// Port (defaults to the scheme's port).
    pub port: Option<u16>,

    /// Account name.
    pub username: Option<String>,

    /// API key, used instead of a password when set.
    pub api_key: Option<String>,

    /// Login domain for password authentication.
    pub login_domain: Option<String>,

    /// Use HTTPS.
    pub use_ssl: Option<bool>,

    /// Validate the server certificate.
    pub validate_certs: Option<bool>,

    /// Honour proxy environment variables.
    pub use_proxy: Option<bool>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,

    /// Maximum requests per second.
    pub rate_limit: Option<u32>,

    /// Insights group used when `--insights-group` is not given.
    pub insights_group: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

/// Keys accepted by `ndi config set`.
pub const KEYS: &[(&str, &str)] = &[
    ("host", "Nexus Dashboard host name, address or URL"),
    ("port", "Port number"),
    ("username", "Account name"),
    ("api_key", "API key (used instead of a password)"),
    ("login_domain", "Login domain for password authentication"),
    ("use_ssl", "Use HTTPS (true/false)"),
    ("validate_certs", "Validate the server certificate (true/false)"),
    ("use_proxy", "Honour proxy environment variables (true/false)"),
    ("timeout", "Request timeout in seconds"),
    ("rate_limit", "Maximum requests per second"),
    ("insights_group", "Default insights group"),
    ("output_format", "Default output format (json/yaml/pretty)"),
];

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "cisco", "ndi")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve an explicit path (with `~` and `$VAR` expansion) or the default one.
    pub fn path(explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(raw) => {
                let expanded = shellexpand::full(raw)
                    .with_context(|| format!("Could not expand config path {raw}"))?;
                Ok(PathBuf::from(expanded.as_ref()))
            }
            None => Self::default_path(),
        }
    }

    /// Load configuration from a file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set a key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "host" => self.host = Some(value.to_string()),
            "port" => self.port = Some(value.parse().context("port must be a number")?),
            "username" | "user" => self.username = Some(value.to_string()),
            "api_key" => self.api_key = Some(value.to_string()),
            "login_domain" | "domain" => self.login_domain = Some(value.to_string()),
            "use_ssl" => self.use_ssl = Some(parse_bool(value)?),
            "validate_certs" => self.validate_certs = Some(parse_bool(value)?),
            "use_proxy" => self.use_proxy = Some(parse_bool(value)?),
            "timeout" => {
                self.timeout = Some(value.parse().context("timeout must be a number of seconds")?);
            }
            "rate_limit" => {
                self.rate_limit = Some(value.parse().context("rate_limit must be a number")?);
            }
            "insights_group" | "ig_name" => self.insights_group = Some(value.to_string()),
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            _ => anyhow::bail!("{}", unknown_key(key)),
        }
        Ok(())
    }

    /// Clear a key, falling back to the built-in default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "host" => self.host = None,
            "port" => self.port = None,
            "username" | "user" => self.username = None,
            "api_key" => self.api_key = None,
            "login_domain" | "domain" => self.login_domain = None,
            "use_ssl" => self.use_ssl = None,
            "validate_certs" => self.validate_certs = None,
            "use_proxy" => self.use_proxy = None,
            "timeout" => self.timeout = None,
            "rate_limit" => self.rate_limit = None,
            "insights_group" | "ig_name" => self.insights_group = None,
            "output_format" | "output" => self.output_format = None,
            _ => anyhow::bail!("{}", unknown_key(key)),
        }
        Ok(())
    }

    /// A copy safe to display, with the API key masked.
    #[must_use]
    pub fn masked(&self) -> Self {
        Self {
            api_key: self.api_key.as_deref().map(mask),
            ..self.clone()
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => anyhow::bail!("expected true or false, got {value}"),
    }
}

fn unknown_key(key: &str) -> String {
    let mut message = format!("Unknown config key: {key}\n\nAvailable keys:\n");
    for (name, help) in KEYS {
        message.push_str(&format!("  {name:<16} - {help}\n"));
    }
    message
}

/// Mask a secret, keeping a short prefix and suffix of long values.
#[must_use]
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("host", "nd.example.com").unwrap();
        config.set("validate_certs", "no").unwrap();
        config.set("timeout", "60").unwrap();
        config.set("rate_limit", "5").unwrap();
        config.set("output", "yaml").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.host.as_deref(), Some("nd.example.com"));
        assert_eq!(loaded.validate_certs, Some(false));
        assert_eq!(loaded.timeout, Some(60));
        assert_eq!(loaded.rate_limit, Some(5));
        assert_eq!(loaded.output_format, Some(OutputFormat::Yaml));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut config = Config::default();
        let err = config.set("colour", "blue").unwrap_err();
        assert!(err.to_string().contains("Available keys"));
        assert!(config.unset("colour").is_err());
        assert!(config.set("use_ssl", "maybe").is_err());
    }

    #[test]
    fn api_key_is_masked() {
        let config = Config {
            api_key: Some("0123456789abcdef".to_string()),
            ..Config::default()
        };
        assert_eq!(config.masked().api_key.as_deref(), Some("0123...cdef"));
        assert_eq!(mask("short"), "****");
    }

    #[test]
    fn explicit_path_is_expanded() {
        let path = Config::path(Some("/tmp/ndi/config.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/ndi/config.toml"));
    }
}
