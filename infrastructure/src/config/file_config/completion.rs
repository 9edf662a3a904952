//! Completion endpoint configuration from TOML (`[completion]` section)

use crate::groq::credential::{CredentialSource, DEFAULT_API_KEY_ENV};
use askline_domain::CompletionSettings;
use askline_domain::request::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw completion configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompletionConfig {
    /// API root; `/chat/completions` is appended
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Maximum response length in tokens
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Environment variable name for the API key (default: "GROQ_API_KEY")
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
}

impl Default for FileCompletionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
        }
    }
}

impl FileCompletionConfig {
    /// Endpoint settings for the completion client
    pub fn to_settings(&self) -> CompletionSettings {
        CompletionSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }

    /// Where the client should look for its credential
    pub fn credential_source(&self) -> CredentialSource {
        CredentialSource::from_env(&self.api_key_env).with_explicit(self.api_key.clone())
    }
}
