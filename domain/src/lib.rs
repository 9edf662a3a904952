//! Domain layer for askline
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Query history**: past queries, normalized (trimmed, first letter
//!   uppercased) and kept free of duplicates
//! - **Conversation log**: the question/answer transcript of one session,
//!   never persisted
//! - **Request state**: the single in-flight completion request and its
//!   last error

pub mod config;
pub mod conversation;
pub mod core;
pub mod history;
pub mod request;
pub mod util;

// Re-export commonly used types
pub use config::{OutputFormat, Theme};
pub use conversation::{ConversationEntry, ConversationLog};
pub use core::error::DomainError;
pub use history::{HistoryList, QueryRecord};
pub use request::{CompletionSettings, RequestState};
