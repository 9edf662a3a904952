//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod completion;
mod output;
mod repl;
mod storage;

pub use completion::FileCompletionConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use repl::FileReplConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("completion.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("completion.max_tokens cannot be 0")]
    InvalidMaxTokens,

    #[error("completion.model cannot be empty")]
    EmptyModelName,

    #[error("completion.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("completion.api_key_env cannot be empty")]
    EmptyApiKeyEnv,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion endpoint settings
    pub completion: FileCompletionConfig,
    /// Durable storage settings
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        let completion = &self.completion;

        if completion.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if completion.max_tokens == 0 {
            issues.push(ConfigValidationError::InvalidMaxTokens);
        }
        if completion.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if !(completion.base_url.starts_with("http://") || completion.base_url.starts_with("https://"))
        {
            issues.push(ConfigValidationError::InvalidBaseUrl(
                completion.base_url.clone(),
            ));
        }
        if completion.api_key_env.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyApiKeyEnv);
        }

        issues
    }
}
