//! Configuration file loading for askline
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ASKLINE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./askline.toml` or `./.askline.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/askline/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCompletionConfig, FileConfig, FileOutputConfig, FileOutputFormat,
    FileReplConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
