//! Session-scoped conversation log

use super::entry::ConversationEntry;

/// In-memory ordered record of the current session's exchanges (Entity)
///
/// Entries are only ever added in question/answer pairs, so the log always
/// has an even length and alternates starting with a question.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed exchange: the question first, then the answer.
    pub fn record_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.entries.reserve(2);
        self.entries.push(ConversationEntry::Question(question.into()));
        self.entries.push(ConversationEntry::Answer(answer.into()));
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of completed question/answer pairs
    pub fn exchange_count(&self) -> usize {
        self.entries.len() / 2
    }
}
