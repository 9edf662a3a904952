//! Application layer for askline
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    completion_gateway::{CompletionError, CompletionGateway},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ProgressNotifier},
    storage::{HISTORY_KEY, KeyValueStorage, MemoryStorage, StorageError, THEME_KEY},
};
pub use use_cases::chat::{ChatOrchestrator, SubmitError, SubmitOutcome, Submission};
pub use use_cases::history_store::HistoryStore;
pub use use_cases::preferences::PreferenceStore;
