//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior, resolved from the
//! file config and command-line flags before the UI starts.

use askline_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Seed line-editor recall with the stored query history
    pub preload_history: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            preload_history: true,
        }
    }
}
