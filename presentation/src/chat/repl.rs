//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::ConsoleFormatter;
use askline_application::{ChatOrchestrator, PreferenceStore, SubmitError, SubmitOutcome};
use askline_domain::Theme;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    /// Re-ask the history entry with this 1-based number
    Use(usize),
    /// Drop the history entry with this 1-based number
    Forget(usize),
    ClearHistory,
    Retry,
    /// Switch theme, toggling when no theme is named
    Theme(Option<Theme>),
    Log,
    Quit,
    /// Recognized command with bad arguments
    Usage(&'static str),
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for ordinary input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "help" | "h" | "?" => Self::Help,
            "history" | "hist" => Self::History,
            "use" => match parse_number(arg) {
                Some(n) => Self::Use(n),
                None => Self::Usage("/use N  (N as listed by /history)"),
            },
            "forget" => match parse_number(arg) {
                Some(n) => Self::Forget(n),
                None => Self::Usage("/forget N  (N as listed by /history)"),
            },
            "clear-history" => Self::ClearHistory,
            "retry" => Self::Retry,
            "theme" if arg.is_empty() => Self::Theme(None),
            "theme" => match arg.parse::<Theme>() {
                Ok(theme) => Self::Theme(Some(theme)),
                Err(_) => Self::Usage("/theme [dark|light]"),
            },
            "log" => Self::Log,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }
}

fn parse_number(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok().filter(|n| *n > 0)
}

/// Interactive chat REPL
pub struct ChatRepl {
    orchestrator: Arc<ChatOrchestrator>,
    preferences: PreferenceStore,
    formatter: ConsoleFormatter,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(
        orchestrator: Arc<ChatOrchestrator>,
        preferences: PreferenceStore,
        formatter: ConsoleFormatter,
    ) -> Self {
        Self {
            orchestrator,
            preferences,
            formatter,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if self.config.preload_history {
            for record in self.orchestrator.history().iter() {
                let _ = rl.add_history_entry(record.as_str());
            }
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.orchestrator.set_input(line);
                    let result = self.orchestrator.submit_input().await;
                    self.report(result);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("askline - model: {}", self.orchestrator.model());
        let stored = self.orchestrator.history().len();
        if stored > 0 {
            println!("{} previous queries, /history to list them", stored);
        }
        println!("Type a question, or /help for commands.");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?          - Show this help");
        println!("  /history               - List previous queries");
        println!("  /use N                 - Ask previous query N again");
        println!("  /forget N              - Remove previous query N");
        println!("  /clear-history         - Remove all previous queries");
        println!("  /retry                 - Resend the last failed question");
        println!("  /theme [dark|light]    - Switch the code highlighting theme");
        println!("  /log                   - Show this session's questions and answers");
        println!("  /quit, /exit, /q       - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, command: ReplCommand) -> bool {
        debug!("REPL command: {:?}", command);
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::History => {
                println!("{}", self.formatter.format_history(&self.orchestrator.history()));
            }
            ReplCommand::Use(n) => {
                let result = self.orchestrator.select_history(n - 1).await;
                self.report(result);
            }
            ReplCommand::Forget(n) => {
                let history = self.orchestrator.history();
                match history.get(n - 1) {
                    Some(record) => {
                        let updated = self.orchestrator.remove_history(record.as_str());
                        println!("Removed \"{}\".", record);
                        println!("{}", self.formatter.format_history(&updated));
                    }
                    None => println!("No previous query numbered {}.", n),
                }
                self.print_warning();
            }
            ReplCommand::ClearHistory => {
                self.orchestrator.clear_history();
                println!("History cleared.");
                self.print_warning();
            }
            ReplCommand::Retry => {
                if self.orchestrator.input().trim().is_empty() {
                    println!("Nothing to retry.");
                } else {
                    let result = self.orchestrator.submit_input().await;
                    self.report(result);
                }
            }
            ReplCommand::Theme(theme) => {
                let theme = theme.unwrap_or_else(|| self.formatter.theme().toggle());
                self.formatter.set_theme(theme);
                if let Err(e) = self.preferences.save_theme(theme) {
                    warn!("Could not save theme: {}", e);
                    eprintln!(
                        "{}",
                        self.formatter
                            .format_warning(&format!("Theme will not be remembered: {}", e))
                    );
                }
                println!("Theme: {}", theme);
            }
            ReplCommand::Log => {
                let log = self.orchestrator.conversation();
                println!("{}", self.formatter.format_conversation(&log));
                if !log.is_empty() {
                    println!();
                    println!("{} exchanges this session.", log.exchange_count());
                }
            }
            ReplCommand::Usage(usage) => println!("Usage: {}", usage),
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn report(&self, result: Result<SubmitOutcome, SubmitError>) {
        match result {
            Ok(SubmitOutcome::Answered { question, answer }) => {
                println!();
                println!(
                    "{}",
                    self.formatter
                        .format_answer(&question, &answer, self.orchestrator.model())
                );
                println!();
            }
            Ok(SubmitOutcome::Ignored) => {}
            Err(SubmitError::Completion(e)) => {
                let message = self.orchestrator.error().unwrap_or_else(|| e.user_message());
                eprintln!("{}", self.formatter.format_error(&message));
                if e.is_retryable() {
                    eprintln!("Type /retry to send it again.");
                }
            }
            Err(e) => eprintln!("{}", self.formatter.format_error(&e.to_string())),
        }
        self.print_warning();
    }

    fn print_warning(&self) {
        if let Some(warning) = self.orchestrator.take_warning() {
            eprintln!("{}", self.formatter.format_warning(&warning));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(ReplCommand::parse("what is /usr?"), None);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(ReplCommand::parse("/help"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("/history"), Some(ReplCommand::History));
        assert_eq!(
            ReplCommand::parse("/clear-history"),
            Some(ReplCommand::ClearHistory)
        );
        assert_eq!(ReplCommand::parse("/retry"), Some(ReplCommand::Retry));
        assert_eq!(ReplCommand::parse("/log"), Some(ReplCommand::Log));
        assert_eq!(ReplCommand::parse(" /q "), Some(ReplCommand::Quit));
    }

    #[test]
    fn test_parse_numbered_commands() {
        assert_eq!(ReplCommand::parse("/use 3"), Some(ReplCommand::Use(3)));
        assert_eq!(ReplCommand::parse("/forget  2"), Some(ReplCommand::Forget(2)));
        assert!(matches!(
            ReplCommand::parse("/use 0"),
            Some(ReplCommand::Usage(_))
        ));
        assert!(matches!(
            ReplCommand::parse("/forget two"),
            Some(ReplCommand::Usage(_))
        ));
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(ReplCommand::parse("/theme"), Some(ReplCommand::Theme(None)));
        assert_eq!(
            ReplCommand::parse("/theme light"),
            Some(ReplCommand::Theme(Some(Theme::Light)))
        );
        assert!(matches!(
            ReplCommand::parse("/theme neon"),
            Some(ReplCommand::Usage(_))
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            ReplCommand::parse("/frobnicate now"),
            Some(ReplCommand::Unknown("/frobnicate now".to_string()))
        );
    }
}
