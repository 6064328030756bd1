//! Terminal rendering for matches and answer code

use std::io::{self, Write};

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};
use tq_core::{AnswerFile, DEFAULT_THEME, MatchResult};

/// Max theory lines shown in a one-shot search before truncating
const MAX_DISPLAY_LINES: usize = 12;
const HEAD_LINES: usize = 5;
const TAIL_LINES: usize = 3;

/// Writes matches and answers, with or without ANSI styling.
pub struct Renderer {
    highlighter: Option<SyntaxHighlighter>,
    fallback_syntax: String,
}

impl Renderer {
    /// Styled output using the given syntect theme.
    pub fn styled(theme: &str, fallback_syntax: &str) -> Self {
        Self {
            highlighter: Some(SyntaxHighlighter::new(theme)),
            fallback_syntax: fallback_syntax.to_string(),
        }
    }

    /// Plain output, for pipes and tests.
    pub fn plain(fallback_syntax: &str) -> Self {
        Self {
            highlighter: None,
            fallback_syntax: fallback_syntax.to_string(),
        }
    }

    fn styled_output(&self) -> bool {
        self.highlighter.is_some()
    }

    /// Header line plus the theory text of one match.
    ///
    /// `full` prints the whole record; otherwise long records are cut to a
    /// head and tail excerpt.
    pub fn write_match(
        &self,
        out: &mut impl Write,
        position: usize,
        total: usize,
        result: &MatchResult<'_>,
        full: bool,
    ) -> io::Result<()> {
        let title = result.title().unwrap_or_else(|| "Untitled".to_string());

        if self.styled_output() {
            let score_color = if result.score > 0.7 {
                "\x1b[32m" // Green for high scores
            } else if result.score > 0.4 {
                "\x1b[33m" // Yellow for medium scores
            } else {
                "\x1b[31m" // Red for low scores
            };
            writeln!(
                out,
                "\x1b[1;36m[{}/{}]\x1b[0m \x1b[1m{}\x1b[0m (Score: {}{:.3}\x1b[0m)",
                position, total, title, score_color, result.score
            )?;
        } else {
            writeln!(
                out,
                "[{}/{}] {} (Score: {:.3})",
                position, total, title, result.score
            )?;
        }

        let theory = result.record.text().trim();
        if full {
            writeln!(out, "\n{}\n", theory)
        } else {
            writeln!(out, "{}", self.excerpt(theory))
        }
    }

    /// Answer code for a title, or a not-found notice.
    pub fn write_answer(
        &self,
        out: &mut impl Write,
        title: &str,
        answer: Option<&AnswerFile>,
    ) -> io::Result<()> {
        let Some(answer) = answer else {
            return writeln!(out, "\nAnswer file not found for '{}'.\n", title);
        };

        writeln!(out, "\nAnswer Code for '{}' ({}):\n", title, answer.filename)?;
        let extension = answer.extension().unwrap_or(&self.fallback_syntax);
        match &self.highlighter {
            Some(highlighter) => writeln!(out, "{}", highlighter.highlight(&answer.content, extension))?,
            None => writeln!(out, "{}", answer.content)?,
        }
        writeln!(out, "{}", "=".repeat(100))
    }

    fn excerpt(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();
        let total_lines = lines.len();
        let mut result = String::new();

        if total_lines <= MAX_DISPLAY_LINES {
            for line in &lines {
                result.push_str(&format!("│ {}\n", line));
            }
            return result;
        }

        for line in &lines[..HEAD_LINES] {
            result.push_str(&format!("│ {}\n", line));
        }
        let hidden = total_lines - HEAD_LINES - TAIL_LINES;
        if self.styled_output() {
            result.push_str(&format!("\x1b[2m┊  ... {} more lines ...\x1b[0m\n", hidden));
        } else {
            result.push_str(&format!("┊  ... {} more lines ...\n", hidden));
        }
        for line in &lines[total_lines - TAIL_LINES..] {
            result.push_str(&format!("│ {}\n", line));
        }
        result
    }
}

/// Wrapper around syntect for syntax highlighting.
struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntaxHighlighter {
    fn new(theme_name: &str) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown theme {}, using {}", theme_name, DEFAULT_THEME);
                theme_set.themes.remove(DEFAULT_THEME).unwrap_or_default()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    fn highlight(&self, code: &str, extension: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
                }
                Err(_) => {
                    output.push_str(line);
                }
            }
        }
        output.push_str("\x1b[0m"); // Reset colors

        output
    }
}
