//! Completion request domain: lifecycle state and endpoint settings.

mod settings;
mod state;

pub use settings::{
    CompletionSettings, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
pub use state::RequestState;
