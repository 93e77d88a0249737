//! Errors surfaced by the REST transport.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("network error calling {endpoint}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("failed to decode response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Text suitable for a toast notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Timeout { .. } => "The server took too long to respond".to_string(),
            ApiError::Network { .. } => "Could not reach the game server".to_string(),
            ApiError::Decode { .. } => "Unexpected response from the game server".to_string(),
            ApiError::InvalidUrl(_) | ApiError::Client(_) => {
                "The client is misconfigured".to_string()
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
