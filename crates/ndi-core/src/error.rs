use thiserror::Error;

/// Result type alias for Nexus Dashboard operations
pub type Result<T> = std::result::Result<T, NdiError>;

/// Errors raised by the Nexus Dashboard transport
#[derive(Error, Debug)]
pub enum NdiError {
    /// Authentication failed or the session is not authorized for the resource
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// Login request was rejected or returned no token
    #[error("login failed: {0}")]
    Login(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl NdiError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Login(_))
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_not_retryable() {
        let err = NdiError::Api {
            code: 500,
            message: "internal".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn transient_errors_are_retryable() {
        assert!(NdiError::Timeout(30).is_retryable());
        assert!(NdiError::Connection("reset".to_string()).is_retryable());
        assert!(NdiError::RateLimited { retry_after: None }.is_retryable());
        assert!(!NdiError::Unauthorized("expired".to_string()).is_retryable());
    }
}
