//! Terminal markdown rendering with code highlighting
//!
//! Answers arrive as markdown. [`MarkdownRenderer`] walks the pulldown-cmark
//! event stream and writes ANSI-styled text. Fenced code blocks that name a
//! language syntect knows are highlighted with 24-bit color escapes; other
//! code blocks are printed indented and unstyled.

use askline_domain::Theme;
use colored::{ColoredString, Colorize};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};
use tracing::debug;

const CODE_INDENT: &str = "    ";
const ANSI_RESET: &str = "\x1b[0m";

fn syntect_theme_name(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "base16-ocean.dark",
        Theme::Light => "InspiredGitHub",
    }
}

#[derive(Default)]
struct InlineStyle {
    bold: u32,
    italic: u32,
    strike: u32,
    heading: bool,
}

/// Renders markdown answers for the terminal
pub struct MarkdownRenderer {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
    theme: Theme,
    color: bool,
}

impl MarkdownRenderer {
    /// Colored renderer using the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
            theme,
            color: true,
        }
    }

    /// Renderer that emits no escape sequences at all
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::new(Theme::default())
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Render `markdown` to terminal text
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);

        let mut out = String::new();
        let mut style = InlineStyle::default();
        let mut lists: Vec<Option<u64>> = Vec::new();
        let mut links: Vec<String> = Vec::new();
        let mut code: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Heading { level, .. } => {
                        style.heading = true;
                        out.push_str(&self.styled(&heading_prefix(level), &style));
                    }
                    Tag::Emphasis => style.italic += 1,
                    Tag::Strong => style.bold += 1,
                    Tag::Strikethrough => style.strike += 1,
                    Tag::List(start) => {
                        if !lists.is_empty() && !out.ends_with('\n') {
                            out.push('\n');
                        }
                        lists.push(start);
                    }
                    Tag::Item => {
                        let depth = lists.len().saturating_sub(1);
                        out.push_str(&"  ".repeat(depth));
                        match lists.last_mut() {
                            Some(Some(n)) => {
                                out.push_str(&format!("{}. ", n));
                                *n += 1;
                            }
                            _ => out.push_str("• "),
                        }
                    }
                    Tag::CodeBlock(kind) => {
                        let lang = match kind {
                            CodeBlockKind::Fenced(info) => info
                                .split_whitespace()
                                .next()
                                .map(str::to_string)
                                .filter(|l| !l.is_empty()),
                            CodeBlockKind::Indented => None,
                        };
                        code = Some((lang, String::new()));
                    }
                    Tag::Link { dest_url, .. } => links.push(dest_url.to_string()),
                    _ => {}
                },
                Event::End(tag) => match tag {
                    TagEnd::Heading(_) => {
                        style.heading = false;
                        out.push_str("\n\n");
                    }
                    TagEnd::Paragraph => {
                        out.push('\n');
                        if lists.is_empty() {
                            out.push('\n');
                        }
                    }
                    TagEnd::Emphasis => style.italic = style.italic.saturating_sub(1),
                    TagEnd::Strong => style.bold = style.bold.saturating_sub(1),
                    TagEnd::Strikethrough => style.strike = style.strike.saturating_sub(1),
                    TagEnd::Item => {
                        if !out.ends_with('\n') {
                            out.push('\n');
                        }
                    }
                    TagEnd::List(_) => {
                        lists.pop();
                        if lists.is_empty() {
                            out.push('\n');
                        }
                    }
                    TagEnd::CodeBlock => {
                        if let Some((lang, body)) = code.take() {
                            out.push_str(&self.render_code_block(lang.as_deref(), &body));
                            out.push('\n');
                        }
                    }
                    TagEnd::Link => {
                        if let Some(url) = links.pop() {
                            out.push_str(&self.dim(&format!(" ({})", url)));
                        }
                    }
                    _ => {}
                },
                Event::Text(text) => match code.as_mut() {
                    Some((_, body)) => body.push_str(&text),
                    None => out.push_str(&self.styled(&text, &style)),
                },
                Event::Code(text) => out.push_str(&self.inline_code(&text)),
                Event::SoftBreak => out.push(' '),
                Event::HardBreak => out.push('\n'),
                Event::Rule => {
                    out.push_str(&self.dim(&"─".repeat(40)));
                    out.push_str("\n\n");
                }
                Event::Html(html) | Event::InlineHtml(html) => out.push_str(&html),
                Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
                _ => {}
            }
        }

        out.trim_end().to_string()
    }

    /// Render one code block, highlighted when the language is known.
    fn render_code_block(&self, lang: Option<&str>, body: &str) -> String {
        let body = body.strip_suffix('\n').unwrap_or(body);

        if self.color
            && let Some(lang) = lang
            && let Some(highlighted) = self.highlight(lang, body)
        {
            return highlighted;
        }

        body.lines()
            .map(|line| format!("{CODE_INDENT}{line}\n"))
            .collect()
    }

    fn highlight(&self, lang: &str, body: &str) -> Option<String> {
        let syntax = self.syntaxes.find_syntax_by_token(lang)?;
        let theme = self.themes.themes.get(syntect_theme_name(self.theme))?;
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut out = String::new();
        for line in LinesWithEndings::from(body) {
            let ranges = match highlighter.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => ranges,
                Err(e) => {
                    debug!("Highlighting {} failed: {}", lang, e);
                    return None;
                }
            };
            out.push_str(CODE_INDENT);
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
            out.push_str(ANSI_RESET);
            if !line.ends_with('\n') {
                out.push('\n');
            }
        }
        Some(out)
    }

    fn styled(&self, text: &str, style: &InlineStyle) -> String {
        if !self.color {
            return text.to_string();
        }
        let mut s: ColoredString = text.normal();
        if style.heading {
            s = s.bold().underline();
        }
        if style.bold > 0 {
            s = s.bold();
        }
        if style.italic > 0 {
            s = s.italic();
        }
        if style.strike > 0 {
            s = s.strikethrough();
        }
        s.to_string()
    }

    fn inline_code(&self, text: &str) -> String {
        if !self.color {
            return format!("`{}`", text);
        }
        match self.theme {
            Theme::Dark => text.yellow().to_string(),
            Theme::Light => text.magenta().to_string(),
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

fn heading_prefix(level: HeadingLevel) -> String {
    let hashes = match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    };
    format!("{} ", "#".repeat(hashes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraphs_and_emphasis() {
        let renderer = MarkdownRenderer::plain();
        let out = renderer.render("Hello *world*, this is **bold**.\n\nSecond paragraph.");
        assert_eq!(out, "Hello world, this is bold.\n\nSecond paragraph.");
    }

    #[test]
    fn test_plain_heading() {
        let out = MarkdownRenderer::plain().render("## Ownership\n\nBody");
        assert_eq!(out, "## Ownership\n\nBody");
    }

    #[test]
    fn test_lists() {
        let out = MarkdownRenderer::plain().render("- one\n- two\n\n1. first\n2. second");
        assert!(out.contains("• one\n• two"));
        assert!(out.contains("1. first\n2. second"));
    }

    #[test]
    fn test_inline_code_and_links() {
        let out = MarkdownRenderer::plain().render("Use `cargo` from [the book](https://doc.rust-lang.org/book).");
        assert_eq!(out, "Use `cargo` from the book (https://doc.rust-lang.org/book).");
    }

    #[test]
    fn test_plain_code_block_is_indented() {
        let out = MarkdownRenderer::plain().render("```rust\nfn main() {}\n```");
        assert_eq!(out, "    fn main() {}");
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_known_language_is_highlighted() {
        let renderer = MarkdownRenderer::new(Theme::Dark);
        let out = renderer.render("```rust\nfn main() {\n    println!(\"hi\");\n}\n```");
        assert!(out.contains("\x1b[38;2;"));
        assert!(out.contains("main"));
        assert!(out.contains("println"));
    }

    #[test]
    fn test_untagged_code_block_is_not_highlighted() {
        let renderer = MarkdownRenderer::new(Theme::Dark);
        let out = renderer.render("```\nplain text\n```");
        assert!(out.contains("    plain text"));
        assert!(!out.contains("\x1b[38;2;"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let renderer = MarkdownRenderer::new(Theme::Light);
        let out = renderer.render("```klingon\nqapla'\n```");
        assert!(out.contains("    qapla'"));
        assert!(!out.contains("\x1b[38;2;"));
    }

    #[test]
    fn test_themes_produce_different_highlighting() {
        let md = "```python\ndef f():\n    return 1\n```";
        let mut renderer = MarkdownRenderer::new(Theme::Dark);
        let dark = renderer.render(md);
        renderer.set_theme(Theme::Light);
        let light = renderer.render(md);
        assert_ne!(dark, light);
        assert_eq!(renderer.theme(), Theme::Light);
    }
}
