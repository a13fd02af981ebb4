//! Client configuration types.

use std::fmt;
use std::time::Duration;

/// Login domain used when none is given
pub const DEFAULT_LOGIN_DOMAIN: &str = "local";

/// How the client authenticates against Nexus Dashboard
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Username/password login exchanged for a session token
    Password {
        /// Account name
        username: String,
        /// Account password
        password: String,
        /// Login domain (`local` for local accounts)
        domain: String,
    },

    /// Per-request API key
    ApiKey {
        /// Account the key belongs to
        username: String,
        /// The API key
        key: String,
    },
}

impl Credentials {
    /// Password credentials in the [`DEFAULT_LOGIN_DOMAIN`]
    #[must_use]
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: password.into(),
            domain: DEFAULT_LOGIN_DOMAIN.to_string(),
        }
    }

    /// API key credentials
    #[must_use]
    pub fn api_key(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ApiKey {
            username: username.into(),
            key: key.into(),
        }
    }

    /// Set the login domain (password credentials only)
    #[must_use]
    pub fn with_domain(self, login_domain: impl Into<String>) -> Self {
        match self {
            Self::Password {
                username, password, ..
            } => Self::Password {
                username,
                password,
                domain: login_domain.into(),
            },
            other => other,
        }
    }

    /// The account name
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Password { username, .. } | Self::ApiKey { username, .. } => username,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password {
                username, domain, ..
            } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"****")
                .field("domain", domain)
                .finish(),
            Self::ApiKey { username, .. } => f
                .debug_struct("ApiKey")
                .field("username", username)
                .field("key", &"****")
                .finish(),
        }
    }
}

/// Retry configuration for failed requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Whether to retry on rate limit errors
    pub retry_on_rate_limit: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            retry_on_rate_limit: true,
        }
    }

    /// Never retry
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new().max_retries(0)
    }

    /// Set maximum retries
    #[must_use]
    pub const fn max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set initial backoff duration
    #[must_use]
    pub const fn initial_backoff(mut self, duration: Duration) -> Self {
        self.initial_backoff = duration;
        self
    }

    /// Set maximum backoff duration
    #[must_use]
    pub const fn max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Set whether rate-limited requests are retried
    #[must_use]
    pub const fn retry_on_rate_limit(mut self, retry: bool) -> Self {
        self.retry_on_rate_limit = retry;
        self
    }

    /// Calculate backoff for a given attempt
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let initial = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        let backoff = initial.saturating_mul(2u64.saturating_pow(attempt));
        Duration::from_millis(backoff.min(max))
    }
}
