// src/error/mod.rs
//! Error types shared across the client.
//!
//! Collection operations never let these escape to the caller: failures are
//! folded into the collection's `last_error` field (see `store`). Only
//! caller-initiated mutations (like/unlike, score lookups) re-raise.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, connect, TLS, broken body).
    #[error("Network Error: {0}")]
    Network(String),

    /// Request exceeded the configured HTTP timeout.
    #[error("Request Timeout: {0}")]
    Timeout(String),

    /// Backend returned a non-2xx status. `message` is display-ready:
    /// the response body's `message` field when present, else generic.
    #[error("API Error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected wire shape.
    #[error("Parse Error: {0}")]
    Parse(String),

    /// Configuration errors (bad base URL, missing settings).
    #[error("Config Error: {0}")]
    Config(String),

    /// Operation requires an identity context and none is available.
    #[error("Not authenticated")]
    Unauthenticated,
}

impl ClientError {
    /// Whether a retry could plausibly succeed without intervention.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Timeout(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            ClientError::Parse(_) => false,
            ClientError::Config(_) => false,
            ClientError::Unauthenticated => false,
        }
    }

    /// Message suitable for a collection's `last_error` field. API errors
    /// already carry a server-provided, user-facing message; everything
    /// else falls back to the Display form.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(format!("Invalid URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_message_is_the_server_message() {
        let err = ClientError::Api {
            status: 503,
            message: "Feed temporarily unavailable".to_string(),
        };
        assert_eq!(err.display_message(), "Feed temporarily unavailable");
        assert!(err.is_recoverable());
    }

    #[test]
    fn client_side_api_errors_are_not_recoverable() {
        let err = ClientError::Api {
            status: 404,
            message: "No such job".to_string(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn network_error_display_includes_cause() {
        let err = ClientError::Network("connection refused".to_string());
        assert_eq!(err.display_message(), "Network Error: connection refused");
        assert!(err.is_recoverable());
    }
}
