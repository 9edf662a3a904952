//! Conversation entries

use serde::{Deserialize, Serialize};

/// One side of a question/answer exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum ConversationEntry {
    /// Text the user submitted
    Question(String),
    /// Markdown answer returned by the model
    Answer(String),
}

impl ConversationEntry {
    pub fn question(text: impl Into<String>) -> Self {
        Self::Question(text.into())
    }

    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Question(text) | Self::Answer(text) => text,
        }
    }

    pub fn is_question(&self) -> bool {
        matches!(self, Self::Question(_))
    }
}
