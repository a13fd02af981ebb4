//! Main Nexus Dashboard client implementation.

use crate::api::*;
use crate::config::{Credentials, RetryConfig};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use ndi_core::{NdiError, Result, ScopedRequest, TELEMETRY_PREFIX};
use reqwest::header::COOKIE;
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

/// Login endpoint
const LOGIN_PATH: &str = "login";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Nexus Dashboard Insights telemetry API.
///
/// Cloning is cheap; clones share the HTTP connection pool, the session token
/// and the rate limiter.
#[derive(Clone)]
pub struct NdClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for NdClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field(
                "username",
                &self.inner.credentials.as_ref().map(Credentials::username),
            )
            .field("rate_limited", &self.inner.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    credentials: Option<Credentials>,
    session: RwLock<Option<String>>,
    timeout: Duration,
    retry_config: RetryConfig,
    rate_limiter: Option<DefaultDirectRateLimiter>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_name: &'a str,
    user_passwd: &'a str,
    domain: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    jwttoken: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl NdClient {
    /// Create a builder for the Nexus Dashboard at `host`
    #[must_use]
    pub fn builder(host: impl Into<String>) -> NdClientBuilder {
        NdClientBuilder::new(host)
    }

    /// The base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Access epoch (snapshot) endpoints
    #[must_use]
    pub fn epochs(&self) -> EpochApi<'_> {
        EpochApi::new(self)
    }

    /// Access compliance analysis endpoints
    #[must_use]
    pub fn compliance(&self) -> ComplianceApi<'_> {
        ComplianceApi::new(self)
    }

    /// Log in eagerly.
    ///
    /// Requests log in on first use anyway; calling this surfaces bad
    /// credentials before any query is made. A no-op for API key and
    /// anonymous clients.
    pub async fn login(&self) -> Result<()> {
        if matches!(self.inner.credentials, Some(Credentials::Password { .. })) {
            self.session_token().await?;
        }
        Ok(())
    }

    /// Perform a scoped GET against the telemetry API
    pub(crate) async fn get_scoped<T: DeserializeOwned>(&self, request: &ScopedRequest) -> Result<T> {
        let url = self.telemetry_url(request)?;
        self.get(&url).await
    }

    /// Perform a GET request, retrying transient failures
    async fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let retry = &self.inner.retry_config;
        let mut attempt = 0;

        loop {
            match self.try_get(url).await {
                Err(e) if attempt < retry.max_retries && self.should_retry(&e) => {
                    let wait = retry.backoff_for(attempt);
                    let wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
                    warn!(url = %url, error = %e, attempt, wait_ms, "retrying request");
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    fn should_retry(&self, error: &NdiError) -> bool {
        match error {
            NdiError::RateLimited { .. } => self.inner.retry_config.retry_on_rate_limit,
            e => e.is_retryable(),
        }
    }

    async fn try_get<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        if let Some(limiter) = &self.inner.rate_limiter {
            limiter.until_ready().await;
        }

        debug!(url = %url, "GET request");

        let request = self.authorize(self.inner.http.get(url.clone())).await?;
        let response = request.send().await.map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Attach credentials to a request
    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match &self.inner.credentials {
            None => Ok(request),
            Some(Credentials::ApiKey { username, key }) => Ok(request
                .header("X-Nd-Username", username)
                .header("X-Nd-Apikey", key)),
            Some(Credentials::Password { .. }) => {
                let token = self.session_token().await?;
                Ok(request
                    .bearer_auth(&token)
                    .header(COOKIE, format!("AuthCookie={token}")))
            }
        }
    }

    /// Current session token, logging in at most once
    async fn session_token(&self) -> Result<String> {
        if let Some(token) = self.inner.session.read().await.as_ref() {
            return Ok(token.clone());
        }

        let mut session = self.inner.session.write().await;
        if let Some(token) = session.as_ref() {
            return Ok(token.clone());
        }

        let Some(Credentials::Password {
            username,
            password,
            domain,
        }) = &self.inner.credentials
        else {
            return Err(NdiError::Config("no password credentials configured".to_string()));
        };

        let token = self.login_request(username, password, domain).await?;
        *session = Some(token.clone());
        Ok(token)
    }

    async fn login_request(&self, username: &str, password: &str, domain: &str) -> Result<String> {
        let url = self
            .inner
            .base_url
            .join(LOGIN_PATH)
            .map_err(|e| NdiError::InvalidUrl(e.to_string()))?;
        debug!(url = %url, user = username, domain, "POST login");

        let body = LoginRequest {
            user_name: username,
            user_passwd: password,
            domain,
        };

        let response = self
            .inner
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if matches!(status.as_u16(), 401 | 403) {
            return Err(NdiError::Login(format!(
                "invalid credentials for user '{username}' in domain '{domain}'"
            )));
        }

        let login: LoginResponse = self.handle_response(response).await?;
        login
            .jwttoken
            .or(login.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| NdiError::Login("response did not contain a token".to_string()))
    }

    /// Build the full URL of a telemetry request
    fn telemetry_url(&self, request: &ScopedRequest) -> Result<Url> {
        let mut url = self.inner.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| NdiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(TELEMETRY_PREFIX.split('/'))
            .extend(&request.segments);

        if !request.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.params.iter() {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Classify a reqwest failure
    fn transport_error(&self, error: &reqwest::Error) -> NdiError {
        if error.is_timeout() {
            NdiError::Timeout(self.inner.timeout.as_secs())
        } else if error.is_connect() {
            NdiError::Connection(error.to_string())
        } else {
            NdiError::Http(error.to_string())
        }
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(|e| self.transport_error(&e))?;
            serde_json::from_str(&body).map_err(NdiError::Json)
        } else {
            Err(Self::handle_error(status.as_u16(), response).await)
        }
    }

    /// Convert an error response to an [`NdiError`]
    async fn handle_error(status: u16, response: Response) -> NdiError {
        let resource = response.url().path().to_string();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or(body);

        match status {
            401 | 403 => NdiError::Unauthorized(message),
            404 => NdiError::NotFound { resource },
            429 => {
                warn!("rate limited by Nexus Dashboard");
                NdiError::RateLimited { retry_after }
            }
            _ => NdiError::Api {
                code: status,
                message,
            },
        }
    }
}

/// Pull a human readable message out of an error body
fn error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;

    value
        .pointer("/messages/0/message")
        .or_else(|| value.get("error"))
        .or_else(|| value.get("message"))
        .and_then(|m| m.as_str())
        .map(String::from)
}

/// Builder for configuring an [`NdClient`]
pub struct NdClientBuilder {
    host: String,
    port: Option<u16>,
    use_ssl: bool,
    validate_certs: bool,
    use_proxy: bool,
    base_url: Option<String>,
    timeout: Duration,
    user_agent: String,
    credentials: Option<Credentials>,
    retry_config: RetryConfig,
    requests_per_second: Option<u32>,
}

impl NdClientBuilder {
    /// Create a new builder for the given host name or address
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            use_ssl: true,
            validate_certs: true,
            use_proxy: true,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("ndi-rust/{}", env!("CARGO_PKG_VERSION")),
            credentials: None,
            retry_config: RetryConfig::default(),
            requests_per_second: None,
        }
    }

    /// Set the port (defaults to the scheme's port)
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Use HTTPS (default) or plain HTTP
    #[must_use]
    pub const fn use_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Validate the server certificate (default true)
    #[must_use]
    pub const fn validate_certs(mut self, validate: bool) -> Self {
        self.validate_certs = validate;
        self
    }

    /// Honour proxy environment variables (default true)
    #[must_use]
    pub const fn use_proxy(mut self, use_proxy: bool) -> Self {
        self.use_proxy = use_proxy;
        self
    }

    /// Set the base URL directly, overriding host/port/scheme (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the credentials used to authenticate
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set retry configuration
    #[must_use]
    pub const fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Limit outgoing requests per second, shared by all clones
    #[must_use]
    pub const fn rate_limit(mut self, requests_per_second: u32) -> Self {
        self.requests_per_second = Some(requests_per_second);
        self
    }

    fn resolve_base_url(&self) -> Result<Url> {
        let raw = match &self.base_url {
            Some(url) => url.clone(),
            None if self.host.contains("://") => self.host.clone(),
            None => {
                let scheme = if self.use_ssl { "https" } else { "http" };
                match self.port {
                    Some(port) => format!("{scheme}://{}:{port}/", self.host),
                    None => format!("{scheme}://{}/", self.host),
                }
            }
        };

        let mut url = Url::parse(&raw).map_err(|e| NdiError::InvalidUrl(format!("{raw}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(NdiError::InvalidUrl(raw));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Build the client
    pub fn build(self) -> Result<NdClient> {
        let base_url = self.resolve_base_url()?;

        let mut http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true);
        #[cfg(any(feature = "rustls", feature = "native-tls"))]
        {
            http = http.danger_accept_invalid_certs(!self.validate_certs);
        }
        if !self.use_proxy {
            http = http.no_proxy();
        }
        let http = http
            .build()
            .map_err(|e| NdiError::Config(format!("failed to build HTTP client: {e}")))?;

        let rate_limiter = self
            .requests_per_second
            .and_then(NonZeroU32::new)
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));

        Ok(NdClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                credentials: self.credentials,
                session: RwLock::new(None),
                timeout: self.timeout,
                retry_config: self.retry_config,
                rate_limiter,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndi_core::{AnalyticQuery, Scope, SnapshotId};

    #[test]
    fn base_url_from_host_and_port() {
        let client = NdClient::builder("nd.example.com").port(8443).build().unwrap();
        assert_eq!(client.base_url().as_str(), "https://nd.example.com:8443/");

        let client = NdClient::builder("10.0.0.1").use_ssl(false).build().unwrap();
        assert_eq!(client.base_url().as_str(), "http://10.0.0.1/");
    }

    #[test]
    fn full_url_host_is_used_verbatim() {
        let client = NdClient::builder("http://127.0.0.1:9000").build().unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let client = NdClient::builder("nd.example.com")
            .credentials(Credentials::password("admin", "hunter22"))
            .rate_limit(5)
            .build()
            .unwrap();

        let debug = format!("{client:?}");
        assert!(debug.contains("https://nd.example.com/"));
        assert!(debug.contains("admin"));
        assert!(debug.contains("rate_limited: true"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn invalid_host_is_rejected() {
        let result = NdClient::builder("not a host").build();
        assert!(matches!(result, Err(NdiError::InvalidUrl(_))));
    }

    #[test]
    fn telemetry_url_encodes_reserved_parameters() {
        let client = NdClient::builder("nd.example.com").build().unwrap();
        let scope = Scope::new("my group", "fab1");
        let request = AnalyticQuery::ResultByRequirement.request(&scope, &SnapshotId::new("e-123"));
        let url = client.telemetry_url(&request).unwrap();

        assert_eq!(
            url.path(),
            "/sedgeapi/v1/cisco-nir/api/api/telemetry/v2/insightsGroup/my%20group/fabric/fab1/\
             model/aciPolicy/complianceAnalysis/complianceResultsByRequirement"
        );
        assert_eq!(
            url.query(),
            Some("%24epochId=e-123&%24sort=-requirementName&%24page=0&%24size=10")
        );
    }

    #[test]
    fn error_message_prefers_backend_messages() {
        let body = r#"{"messages": [{"code": 400, "message": "invalid epoch"}]}"#;
        assert_eq!(error_message(body).as_deref(), Some("invalid epoch"));
        assert_eq!(error_message(r#"{"error": "nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message("plain text"), None);
    }
}
