//! Completion Gateway port
//!
//! Defines the interface for asking a remote chat-completion endpoint a
//! single question.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a completion request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// Missing or unusable credential/settings. Retrying will not help.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure or non-success HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint did not answer within the configured timeout.
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The response body lacked the expected first-choice message.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    /// Short machine-readable kind, used in structured event logs
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::Configuration(_) => "configuration",
            CompletionError::Network(_) => "network",
            CompletionError::Timeout(_) => "timeout",
            CompletionError::MalformedResponse(_) => "malformed_response",
        }
    }

    /// Whether resubmitting the same query might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CompletionError::Network(_) | CompletionError::Timeout(_)
        )
    }

    /// The single message shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            CompletionError::Configuration(detail) => {
                format!("Cannot send request: {detail}")
            }
            CompletionError::Network(_) | CompletionError::Timeout(_) => {
                format!("Failed to get answer. Check your connection or API key. ({self})")
            }
            CompletionError::MalformedResponse(_) => {
                "The service returned an answer that could not be read.".to_string()
            }
        }
    }
}

/// Gateway for single-message completions
///
/// This port defines how the application layer asks a question.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send one user message and return the first choice's text
    async fn ask(&self, message: &str) -> Result<String, CompletionError>;

    /// Model identifier sent with each request, for display and logs
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = CompletionError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Request timed out after 30s");
    }

    #[test]
    fn test_retryable() {
        assert!(CompletionError::Network("503".to_string()).is_retryable());
        assert!(CompletionError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!CompletionError::Configuration("no key".to_string()).is_retryable());
        assert!(!CompletionError::MalformedResponse("{}".to_string()).is_retryable());
    }

    #[test]
    fn test_user_message_mentions_connection_for_network() {
        let msg = CompletionError::Network("HTTP 500".to_string()).user_message();
        assert!(msg.starts_with("Failed to get answer."));
        assert!(msg.contains("HTTP 500"));
    }
}
