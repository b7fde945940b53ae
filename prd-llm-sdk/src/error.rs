use thiserror::Error;

/// Error types for LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Authentication failed (HTTP 401/403)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Rate limit or quota exceeded (HTTP 429)
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after: Option<u64>,
    },

    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// API error with status code (HTTP 4xx/5xx except above)
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Network or connection error
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// JSON parsing or serialization error
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// Generic error for unexpected cases
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LlmError {
    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a rate limit error
    pub fn rate_limit<S: Into<String>>(message: S, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    /// Create an invalid request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an API error
    pub fn api_error(status: u16, message: String) -> Self {
        Self::Api { status, message }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status and its message to the matching variant
    pub fn from_status(status: u16, message: String, retry_after: Option<u64>) -> Self {
        match status {
            400 => Self::invalid_request(message),
            401 | 403 => Self::authentication(message),
            413 => Self::invalid_request("Request too large"),
            429 => Self::rate_limit(message, retry_after),
            _ => Self::api_error(status, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            LlmError::from_status(401, "bad key".into(), None),
            LlmError::Authentication { .. }
        ));
        assert!(matches!(
            LlmError::from_status(403, "forbidden".into(), None),
            LlmError::Authentication { .. }
        ));
        assert!(matches!(
            LlmError::from_status(429, "quota".into(), Some(7)),
            LlmError::RateLimit {
                retry_after: Some(7),
                ..
            }
        ));
        assert!(matches!(
            LlmError::from_status(503, "down".into(), None),
            LlmError::Api { status: 503, .. }
        ));
    }

    #[test]
    fn test_error_display_keeps_provider_message() {
        let err = LlmError::authentication("Incorrect API key provided: sk-bad");
        assert_eq!(
            err.to_string(),
            "Authentication failed: Incorrect API key provided: sk-bad"
        );
    }
}
