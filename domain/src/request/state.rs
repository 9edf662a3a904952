//! Request lifecycle state

use serde::Serialize;

/// State of the single outstanding completion request
///
/// ```text
/// Idle ──begin──▶ Submitting ──succeed──▶ Idle
///   ▲                  │
///   │                  └──fail──▶ Failed(message)
///   └────────begin────────────────────┘
/// ```
///
/// `begin` from `Submitting` is refused, which is what keeps at most one
/// request in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    Failed(String),
}

impl RequestState {
    /// Move to `Submitting`, clearing any previous error.
    ///
    /// Returns `false` (and leaves the state alone) if a request is already
    /// in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = Self::Submitting;
        true
    }

    pub fn succeed(&mut self) {
        *self = Self::Idle;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Self::Failed(message.into());
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// The user-visible error message from the last failed request
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
