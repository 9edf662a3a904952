//! Conversation domain: the in-memory transcript of the current session.

mod entry;
mod log;

pub use entry::ConversationEntry;
pub use log::ConversationLog;
