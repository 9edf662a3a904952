//! Completion endpoint settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Groq OpenAI-compatible API root
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Default model identifier
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
/// Default maximum response length in tokens
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything needed to address the completion endpoint, except the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSettings {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl CompletionSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the chat completions route
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CompletionSettings::default();
        assert_eq!(settings.model, "llama-3.3-70b-versatile");
        assert_eq!(settings.max_tokens, 1024);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let settings = CompletionSettings {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
