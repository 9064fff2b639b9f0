use thiserror::Error;

/// Failures a client flow can hit before it is turned into status text.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timed out")]
    Timeout,
    /// Non-2xx response, rendered the way the status line reads.
    #[error("{status} {reason}")]
    HttpStatus { status: u16, reason: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Parse(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn http_status(status: reqwest::StatusCode) -> Self {
        ClientError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if let Some(status) = err.status() {
            ClientError::http_status(status)
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value in env var {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
