//! CLI entrypoint for askline
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use askline_application::{
    ChatOrchestrator, HistoryStore, KeyValueStorage, MemoryStorage, NoProgress, PreferenceStore,
    ProgressNotifier, SubmitError, SubmitOutcome, Submission,
};
use askline_domain::OutputFormat;
use askline_infrastructure::{
    ConfigLoader, FileConfig, GroqCompletionClient, JsonFileStorage, JsonlConversationLogger,
};
use askline_presentation::{ChatRepl, Cli, ConsoleFormatter, ReplConfig, SpinnerProgress};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting askline");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        let list = issues
            .iter()
            .map(|issue| format!("  - {}", issue))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Invalid configuration:\n{}", list);
    }

    let color = config.output.color && !cli.no_color;
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let storage = open_storage(&config, cli.ephemeral)?;

    if cli.reset {
        storage.clear().context("Failed to reset stored data")?;
        println!("All stored data removed.");
        return Ok(());
    }

    let mut history = HistoryStore::load(storage.clone());

    if cli.clear_history {
        history.clear().context("Failed to clear history")?;
        println!("History cleared.");
        return Ok(());
    }

    let preferences = PreferenceStore::new(storage.clone());
    let formatter = ConsoleFormatter::new(format, preferences.load_theme(), color);

    if cli.history {
        println!("{}", formatter.format_history(history.entries()));
        return Ok(());
    }

    let mut settings = config.completion.to_settings();
    if let Some(model) = &cli.model {
        settings = settings.with_model(model.clone());
    }
    if let Some(max_tokens) = cli.max_tokens {
        if max_tokens == 0 {
            bail!("--max-tokens must be greater than 0");
        }
        settings = settings.with_max_tokens(max_tokens);
    }
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            bail!("--timeout must be greater than 0");
        }
        settings = settings.with_timeout(Duration::from_secs(secs));
    }

    let gateway = Arc::new(GroqCompletionClient::new(
        settings,
        config.completion.credential_source(),
    )?);

    let progress: Arc<dyn ProgressNotifier> =
        if cli.quiet || !config.repl.show_progress || format == OutputFormat::Json {
            Arc::new(NoProgress)
        } else {
            Arc::new(SpinnerProgress::new(gateway.settings().model.clone()))
        };

    let mut orchestrator = ChatOrchestrator::new(gateway, history).with_progress(progress);

    if let Some(path) = &cli.transcript {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Writing session events to {}", logger.path().display());
                orchestrator = orchestrator.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Session events will not be recorded"),
        }
    }

    // Interactive mode
    let Some(question) = cli.question else {
        let mut repl = ChatRepl::new(Arc::new(orchestrator), preferences, formatter).with_config(
            ReplConfig {
                preload_history: config.repl.preload_history,
            },
        );
        repl.run().await?;
        return Ok(());
    };

    // Single question mode
    let result = orchestrator.submit(Submission::Typed(question)).await;
    if let Some(warning) = orchestrator.take_warning() {
        eprintln!("{}", formatter.format_warning(&warning));
    }

    match result {
        Ok(SubmitOutcome::Answered { question, answer }) => {
            println!(
                "{}",
                formatter.format_answer(&question, &answer, orchestrator.model())
            );
            Ok(())
        }
        Ok(SubmitOutcome::Ignored) => bail!("Question is empty"),
        Err(SubmitError::Completion(e)) => bail!("{}", e.user_message()),
        Err(e) => Err(e.into()),
    }
}

/// Install the tracing subscriber.
///
/// Logs go to stderr, or to `log_file` when given. The returned guard must
/// stay alive until exit so buffered file lines are flushed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file needs a file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// Durable JSON storage, or an in-memory map for ephemeral runs
fn open_storage(config: &FileConfig, ephemeral: bool) -> Result<Arc<dyn KeyValueStorage>> {
    if ephemeral || config.storage.ephemeral {
        info!("Using in-memory storage");
        return Ok(Arc::new(MemoryStorage::new()));
    }

    let path = config
        .storage
        .resolved_path()
        .or_else(JsonFileStorage::default_path)
        .ok_or_else(|| anyhow!("No data directory found; set storage.path or use --ephemeral"))?;
    let storage = JsonFileStorage::new(path);
    info!("Using storage file {}", storage.path().display());
    Ok(Arc::new(storage))
}
