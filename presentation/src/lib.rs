//! Presentation layer for askline
//!
//! This crate contains CLI definitions, output formatters,
//! the request spinner, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{Cli, OutputFormatArg};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::markdown::MarkdownRenderer;
pub use progress::reporter::SpinnerProgress;
