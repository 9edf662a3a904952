//! CLI command definitions

use askline_domain::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Markdown rendered for the terminal, code highlighted
    Rendered,
    /// The answer text exactly as received
    Raw,
    /// JSON object with question, answer and model
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Rendered => OutputFormat::Rendered,
            OutputFormatArg::Raw => OutputFormat::Raw,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for askline
#[derive(Parser, Debug)]
#[command(name = "askline")]
#[command(author, version, about = "Ask a language model a question from your terminal")]
#[command(long_about = r#"
askline sends a question to an OpenAI-compatible chat completion endpoint
(Groq by default) and prints the answer with markdown rendering.

Without a question it starts an interactive session. Past queries are kept
between runs and can be re-asked with /use N.

The API key is read from the GROQ_API_KEY environment variable unless the
config names another variable.

Configuration files are loaded from (in priority order):
1. ASKLINE_* environment variables, e.g. ASKLINE_COMPLETION__MODEL
2. --config <path>     Explicit config file
3. ./askline.toml      Project-level config
4. ~/.config/askline/config.toml   Global config

Example:
  askline "How do I reverse a Vec in Rust?"
  askline --output raw "Summarize the borrow checker in one line"
  askline --model llama-3.1-8b-instant
"#)]
pub struct Cli {
    /// The question to ask (starts an interactive session when omitted)
    pub question: Option<String>,

    /// Model to query
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum tokens in the answer
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Keep history in memory only for this run
    #[arg(long)]
    pub ephemeral: bool,

    /// Print the stored query history and exit
    #[arg(long, conflicts_with_all = ["clear_history", "reset"])]
    pub history: bool,

    /// Delete the stored query history and exit
    #[arg(long, conflicts_with = "reset")]
    pub clear_history: bool,

    /// Delete all stored data (history and preferences) and exit
    #[arg(long)]
    pub reset: bool,

    /// Append session events (metadata only) to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Write diagnostic logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_one_shot_question_with_flags() {
        let cli = Cli::try_parse_from([
            "askline",
            "-vv",
            "--model",
            "llama-3.1-8b-instant",
            "--output",
            "json",
            "What is a trait?",
        ])
        .unwrap();
        assert_eq!(cli.question.as_deref(), Some("What is a trait?"));
        assert_eq!(cli.model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(cli.output.map(OutputFormat::from), Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_no_question_means_interactive() {
        let cli = Cli::try_parse_from(["askline"]).unwrap();
        assert!(cli.question.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.ephemeral);
    }

    #[test]
    fn test_history_conflicts_with_clear() {
        assert!(Cli::try_parse_from(["askline", "--history", "--clear-history"]).is_err());
    }
}
