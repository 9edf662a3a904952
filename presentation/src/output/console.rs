//! Console output formatter for answers, history and notices

use crate::output::markdown::MarkdownRenderer;
use askline_domain::{ConversationEntry, ConversationLog, HistoryList, OutputFormat, Theme};
use colored::Colorize;

/// Formats chat output for console display
pub struct ConsoleFormatter {
    format: OutputFormat,
    color: bool,
    renderer: MarkdownRenderer,
}

impl ConsoleFormatter {
    pub fn new(format: OutputFormat, theme: Theme, color: bool) -> Self {
        let mut renderer = MarkdownRenderer::new(theme);
        renderer.set_color(color);
        Self {
            format,
            color,
            renderer,
        }
    }

    /// Formatter that never emits escape sequences
    pub fn plain(format: OutputFormat) -> Self {
        Self::new(format, Theme::default(), false)
    }

    pub fn theme(&self) -> Theme {
        self.renderer.theme()
    }

    /// Switch the code highlighting theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.renderer.set_theme(theme);
    }

    /// Format one answered question according to the output format
    pub fn format_answer(&self, question: &str, answer: &str, model: &str) -> String {
        match self.format {
            OutputFormat::Rendered => self.renderer.render(answer),
            OutputFormat::Raw => answer.to_string(),
            OutputFormat::Json => Self::format_json(question, answer, model),
        }
    }

    /// Format as JSON
    pub fn format_json(question: &str, answer: &str, model: &str) -> String {
        let value = serde_json::json!({
            "question": question,
            "answer": answer,
            "model": model,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Numbered history listing, 1-based as the REPL commands expect
    pub fn format_history(&self, history: &HistoryList) -> String {
        if history.is_empty() {
            return self.dim("No previous queries.");
        }

        let mut output = String::new();
        output.push_str(&self.heading("Previous queries:"));
        output.push('\n');
        for (i, record) in history.iter().enumerate() {
            output.push_str(&format!("  {:>3}. {}\n", i + 1, record));
        }
        output.trim_end().to_string()
    }

    /// Replay the questions and answers of this session
    pub fn format_conversation(&self, log: &ConversationLog) -> String {
        if log.is_empty() {
            return self.dim("Nothing asked yet.");
        }

        let mut output = String::new();
        for entry in log.entries() {
            match entry {
                ConversationEntry::Question(text) => {
                    output.push_str(&format!("{} {}\n\n", self.heading("Q:"), text));
                }
                ConversationEntry::Answer(text) => {
                    output.push_str(&self.format_answer_text(text));
                    output.push_str("\n\n");
                }
            }
        }
        output.trim_end().to_string()
    }

    fn format_answer_text(&self, answer: &str) -> String {
        match self.format {
            OutputFormat::Rendered => self.renderer.render(answer),
            OutputFormat::Raw | OutputFormat::Json => answer.to_string(),
        }
    }

    pub fn format_error(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", "Error:".red().bold(), message)
        } else {
            format!("Error: {}", message)
        }
    }

    pub fn format_warning(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", "Warning:".yellow().bold(), message)
        } else {
            format!("Warning: {}", message)
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
