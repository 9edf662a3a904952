//! Groq chat-completions adapter
//!
//! Implements the [`CompletionGateway`](askline_application::CompletionGateway)
//! port against Groq's OpenAI-compatible HTTP API. Any endpoint speaking the
//! same `/chat/completions` dialect works by changing the base URL.
//!
//! - [`protocol`]: request/response wire types and strict response parsing
//! - [`credential`]: bearer key resolution with a redacted `Debug`
//! - [`client`]: the `reqwest`-based gateway

pub mod client;
pub mod credential;
pub mod protocol;
