//! Infrastructure layer for askline
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod groq;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileCompletionConfig, FileConfig, FileOutputConfig,
    FileOutputFormat, FileReplConfig, FileStorageConfig,
};
pub use groq::{
    client::GroqCompletionClient,
    credential::{ApiKey, CredentialSource},
};
pub use logging::JsonlConversationLogger;
pub use storage::JsonFileStorage;
