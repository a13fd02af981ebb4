//! Command implementations.

pub mod compliance;
pub mod config;

use anyhow::{Context as _, Result};
use ndi::{Credentials, NdClient, DEFAULT_LOGIN_DOMAIN};
use std::path::PathBuf;
use std::time::Duration;

use crate::output::OutputFormat;

/// Connection settings after merging flags, environment and config file.
#[derive(Clone, Default)]
pub struct Settings {
    /// Nexus Dashboard host name, address or URL
    pub host: Option<String>,

    /// Port override
    pub port: Option<u16>,

    /// Account name
    pub username: Option<String>,

    /// Account password
    pub password: Option<String>,

    /// API key
    pub api_key: Option<String>,

    /// Login domain
    pub login_domain: Option<String>,

    /// Use HTTPS
    pub use_ssl: bool,

    /// Validate the server certificate
    pub validate_certs: bool,

    /// Honour proxy environment variables
    pub use_proxy: bool,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Maximum requests per second
    pub rate_limit: Option<u32>,

    /// Insights group used when the command does not name one
    pub insights_group: Option<String>,
}

/// Shared context for all commands.
#[derive(Clone)]
pub struct Context {
    /// Connection settings
    pub settings: Settings,

    /// Config file in use
    pub config_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to explain commands before running them
    pub explain: bool,

    /// Disable colors
    pub no_color: bool,
}

impl Context {
    /// Get the host, returning an error if not set.
    pub fn require_host(&self) -> Result<&str> {
        self.settings.host.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Nexus Dashboard host required.\n\n\
                 Set it with one of:\n  \
                 1. --host <HOST>\n  \
                 2. ND_HOST environment variable\n  \
                 3. ndi config set host <HOST>"
            )
        })
    }

    /// Work out how to authenticate, prompting for a password if needed.
    pub fn credentials(&self) -> Result<Option<Credentials>> {
        let settings = &self.settings;

        let Some(username) = settings.username.clone() else {
            if settings.api_key.is_some() {
                anyhow::bail!("An API key needs a username (--username or ND_USERNAME)");
            }
            return Ok(None);
        };

        if let Some(key) = &settings.api_key {
            return Ok(Some(Credentials::api_key(username, key)));
        }

        let password = match &settings.password {
            Some(password) => password.clone(),
            None if console::Term::stderr().is_term() => dialoguer::Password::new()
                .with_prompt(format!("Password for {username}"))
                .interact()
                .context("Could not read password")?,
            None => anyhow::bail!(
                "Password required for user '{username}'.\n\n\
                 Set it with --password or the ND_PASSWORD environment variable,\n\
                 or use an API key (--api-key / ND_API_KEY)."
            ),
        };

        let domain = settings
            .login_domain
            .clone()
            .unwrap_or_else(|| DEFAULT_LOGIN_DOMAIN.to_string());

        Ok(Some(Credentials::password(username, password).with_domain(domain)))
    }

    /// Create a Nexus Dashboard client from the settings.
    pub fn client(&self) -> Result<NdClient> {
        let settings = &self.settings;

        let mut builder = NdClient::builder(self.require_host()?)
            .use_ssl(settings.use_ssl)
            .validate_certs(settings.validate_certs)
            .use_proxy(settings.use_proxy);

        if let Some(port) = settings.port {
            builder = builder.port(port);
        }
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        if let Some(rps) = settings.rate_limit {
            builder = builder.rate_limit(rps);
        }
        if let Some(credentials) = self.credentials()? {
            builder = builder.credentials(credentials);
        }

        builder.build().context("Could not create Nexus Dashboard client")
    }
}
