//! Human-oriented diagnostic rendering.
//!
//! [`AnsiRenderer`] turns a diagnostic into rustc-style terminal text: a
//! colored header line, a `-->` location line, a single-line source snippet
//! with a caret annotation under the primary span, then indented
//! sub-diagnostics and suggestions. [`TextEmitter`] writes the rendered text
//! to any `io::Write` sink.

use std::io::Write;

use super::markdown::render_markdown;
use super::Emitter;
use crate::{Diagnostic, DiagnosticStats, Level, SourceLocator};

/// An ANSI terminal color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiColor {
    /// Reset to the default color
    Default,
    /// Red (errors)
    BrightRed,
    /// Yellow (warnings)
    BrightYellow,
    /// Green (notes)
    BrightGreen,
    /// Cyan (help, inline code)
    BrightCyan,
    /// Blue (line numbers, gutters)
    BrightBlue,
}

impl AnsiColor {
    /// Get the escape sequence for this color
    pub const fn code(self) -> &'static str {
        match self {
            AnsiColor::Default => "\x1b[0m",
            AnsiColor::BrightRed => "\x1b[91m",
            AnsiColor::BrightYellow => "\x1b[93m",
            AnsiColor::BrightGreen => "\x1b[92m",
            AnsiColor::BrightCyan => "\x1b[96m",
            AnsiColor::BrightBlue => "\x1b[94m",
        }
    }
}

/// Rendering style for the human emitter
///
/// # Examples
///
/// ```
/// use zelc_diag::AnsiStyle;
///
/// let colored = AnsiStyle::default();
/// assert!(colored.enabled);
///
/// let plain = AnsiStyle::plain();
/// assert!(!plain.enabled);
/// ```
#[derive(Clone, Debug)]
pub struct AnsiStyle {
    /// Whether escape sequences are emitted at all
    pub enabled: bool,
    /// Color for error-level headers and carets
    pub error_color: AnsiColor,
    /// Color for warnings
    pub warning_color: AnsiColor,
    /// Color for notes
    pub note_color: AnsiColor,
    /// Color for help
    pub help_color: AnsiColor,
    /// Color for inline code
    pub code_color: AnsiColor,
    /// Color for line numbers and gutter bars
    pub line_num_color: AnsiColor,
}

impl Default for AnsiStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            error_color: AnsiColor::BrightRed,
            warning_color: AnsiColor::BrightYellow,
            note_color: AnsiColor::BrightGreen,
            help_color: AnsiColor::BrightCyan,
            code_color: AnsiColor::BrightCyan,
            line_num_color: AnsiColor::BrightBlue,
        }
    }
}

impl AnsiStyle {
    /// A style with all escape sequences disabled
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Renders diagnostics as rustc-style terminal text
pub struct AnsiRenderer {
    style: AnsiStyle,
}

impl AnsiRenderer {
    /// Create a renderer with the given style
    pub fn new(style: AnsiStyle) -> Self {
        Self { style }
    }

    /// Get the style
    pub fn style(&self) -> &AnsiStyle {
        &self.style
    }

    fn level_color(&self, level: Level) -> AnsiColor {
        match level {
            Level::Note => self.style.note_color,
            Level::Help => self.style.help_color,
            Level::Warning => self.style.warning_color,
            Level::Error | Level::Fatal | Level::Bug => self.style.error_color,
        }
    }

    /// Wrap text in a color, if styling is enabled
    pub fn wrap_color(&self, text: &str, color: AnsiColor) -> String {
        if !self.style.enabled {
            return text.to_string();
        }
        format!("{}{}{}", color.code(), text, AnsiColor::Default.code())
    }

    fn wrap_bold(&self, text: &str) -> String {
        if !self.style.enabled {
            return text.to_string();
        }
        format!("\x1b[1m{text}\x1b[0m")
    }

    /// Render one diagnostic to a string
    pub fn render_diagnostic(
        &self,
        diag: &Diagnostic,
        locator: Option<&dyn SourceLocator>,
    ) -> String {
        let mut out = String::new();
        let level_color = self.level_color(diag.level);

        // Header: error[L1012]: message
        let mut header = diag.level.as_str().to_string();
        if let Some(code) = diag.code {
            header.push_str(&format!("[{code}]"));
        }
        out.push_str(&self.wrap_bold(&self.wrap_color(&header, level_color)));
        out.push_str(&self.wrap_bold(": "));
        out.push_str(&render_markdown(&diag.message, &self.style));
        out.push('\n');

        // Location + snippet
        if let (Some(primary), Some(locator)) = (diag.spans.primary(), locator) {
            if primary.span.is_valid() {
                let filename = locator.filename(primary.span);
                let lc = locator.line_column(primary.span.file_id, primary.span.start);
                out.push_str("  ");
                out.push_str(&self.wrap_color("-->", self.style.line_num_color));
                out.push_str(&format!(" {}:{}:{}\n", filename, lc.line, lc.column));
                out.push_str(&self.render_snippet(diag, locator));
            }
        }

        // Sub-diagnostics
        for child in &diag.children {
            let child_color = self.level_color(child.level);
            out.push_str("  = ");
            out.push_str(&self.wrap_bold(&self.wrap_color(child.level.as_str(), child_color)));
            out.push_str(": ");
            out.push_str(&render_markdown(&child.message, &self.style));
            out.push('\n');
        }

        // Suggestions
        for suggestion in &diag.suggestions {
            out.push_str("  = ");
            out.push_str(&self.wrap_bold(&self.wrap_color("help", self.style.help_color)));
            out.push_str(": ");
            out.push_str(&render_markdown(&suggestion.message, &self.style));
            if !suggestion.replacement.is_empty() {
                out.push_str(": ");
                let quoted = format!("`{}`", suggestion.replacement);
                out.push_str(&self.wrap_color(&quoted, self.style.code_color));
            }
            out.push('\n');
        }

        out
    }

    /// Render the single-line source snippet with a caret annotation.
    fn render_snippet(&self, diag: &Diagnostic, locator: &dyn SourceLocator) -> String {
        let Some(primary) = diag.spans.primary() else {
            return String::new();
        };

        let lc = locator.line_column(primary.span.file_id, primary.span.start);
        let line_content = locator.line_content(primary.span.file_id, lc.line);
        if line_content.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        let line_num = lc.line.to_string();
        let margin = " ".repeat(line_num.len());
        let bar = self.wrap_color("|", self.style.line_num_color);

        out.push_str(&format!(" {margin} {bar}\n"));
        out.push_str(&format!(
            " {} {bar} {line_content}\n",
            self.wrap_color(&line_num, self.style.line_num_color)
        ));

        let col = lc.column.saturating_sub(1) as usize;
        let caret_len = (primary.span.len() as usize).max(1);
        let carets = "^".repeat(caret_len);
        let level_color = self.level_color(diag.level);

        out.push_str(&format!(" {margin} {bar} "));
        out.push_str(&" ".repeat(col));
        out.push_str(&self.wrap_color(&carets, level_color));
        if !primary.label.is_empty() {
            out.push(' ');
            out.push_str(&self.wrap_color(&primary.label, level_color));
        }
        out.push('\n');

        out
    }

    /// Render the closing summary in the rustc style.
    pub fn render_summary(&self, stats: &DiagnosticStats) -> String {
        if stats.error_count == 0 && stats.warning_count == 0 {
            return String::new();
        }

        let mut out = String::from("\n");

        if stats.error_count > 0 {
            out.push_str(&self.wrap_color("error", self.style.error_color));
            if stats.error_count == 1 {
                out.push_str(": aborting due to 1 previous error");
            } else {
                out.push_str(&format!(
                    ": aborting due to {} previous errors",
                    stats.error_count
                ));
            }
            if stats.warning_count > 0 {
                out.push_str(&format!(
                    "; {} warning{} emitted",
                    stats.warning_count,
                    if stats.warning_count > 1 { "s" } else { "" }
                ));
            }
            out.push('\n');

            if let Some(first) = stats.unique_error_codes.iter().next() {
                out.push_str(&format!(
                    "\nFor more information about this error, try `zelc --explain {first}`.\n"
                ));
            }
        } else {
            out.push_str(&self.wrap_color("warning", self.style.warning_color));
            out.push_str(&format!(
                ": {} warning{} emitted\n",
                stats.warning_count,
                if stats.warning_count > 1 { "s" } else { "" }
            ));
        }

        out
    }
}

/// Writes rendered diagnostics to an `io::Write` sink
///
/// # Examples
///
/// ```
/// use zelc_diag::{emitter::{Emitter, TextEmitter}, AnsiStyle, Diagnostic};
///
/// let mut emitter = TextEmitter::new(Vec::new(), AnsiStyle::plain());
/// emitter.emit(&Diagnostic::error("boom"), None);
/// let output = String::from_utf8(emitter.into_inner()).unwrap();
/// assert!(output.starts_with("error: boom"));
/// ```
pub struct TextEmitter<W: Write> {
    out: W,
    renderer: AnsiRenderer,
}

impl<W: Write> TextEmitter<W> {
    /// Create a text emitter writing to `out`
    pub fn new(out: W, style: AnsiStyle) -> Self {
        Self {
            out,
            renderer: AnsiRenderer::new(style),
        }
    }

    /// Consume the emitter and return the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Emitter for TextEmitter<W> {
    fn emit(&mut self, diag: &Diagnostic, locator: Option<&dyn SourceLocator>) {
        let rendered = self.renderer.render_diagnostic(diag, locator);
        // Diagnostic output failures are not recoverable mid-compile.
        let _ = self.out.write_all(rendered.as_bytes());
    }

    fn emit_summary(&mut self, stats: &DiagnosticStats) {
        let rendered = self.renderer.render_summary(stats);
        let _ = self.out.write_all(rendered.as_bytes());
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCategory, ErrorCode, LineColumn, Span};

    /// Minimal locator over a single in-memory source.
    struct TestLocator {
        name: &'static str,
        source: &'static str,
    }

    impl SourceLocator for TestLocator {
        fn filename(&self, _span: Span) -> &str {
            self.name
        }

        fn line_column(&self, _file_id: u32, offset: u32) -> LineColumn {
            let mut line = 1;
            let mut column = 1;
            for (i, c) in self.source.char_indices() {
                if i as u32 >= offset {
                    break;
                }
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
            LineColumn { line, column }
        }

        fn line_content(&self, _file_id: u32, line: u32) -> &str {
            self.source.lines().nth(line as usize - 1).unwrap_or("")
        }

        fn source_slice(&self, span: Span) -> &str {
            &self.source[span.start as usize..span.end as usize]
        }
    }

    fn render(diag: &Diagnostic, locator: Option<&dyn SourceLocator>) -> String {
        let mut emitter = TextEmitter::new(Vec::new(), AnsiStyle::plain());
        emitter.emit(diag, locator);
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[test]
    fn test_header_with_code() {
        let diag = Diagnostic::error("unterminated string literal")
            .with_code(ErrorCode::new(ErrorCategory::Lexer, 1012));
        let out = render(&diag, None);
        assert!(out.starts_with("error[L1012]: unterminated string literal"));
    }

    #[test]
    fn test_header_without_code() {
        let out = render(&Diagnostic::warning("watch out"), None);
        assert!(out.starts_with("warning: watch out"));
    }

    #[test]
    fn test_snippet_with_caret() {
        let locator = TestLocator {
            name: "main.zl",
            source: "let s = \"oops\nlet x = 1;",
        };
        let diag = Diagnostic::error("unterminated string literal")
            .with_code(ErrorCode::new(ErrorCategory::Lexer, 1012))
            .with_primary_span(Span::new(1, 8, 13), "string starts here");
        let out = render(&diag, Some(&locator));

        assert!(out.contains("--> main.zl:1:9"));
        assert!(out.contains("1 | let s = \"oops"));
        assert!(out.contains("^^^^^ string starts here"));
    }

    #[test]
    fn test_children_rendered_as_bullets() {
        let diag = Diagnostic::error("boom")
            .with_note("some context")
            .with_help("try this");
        let out = render(&diag, None);
        assert!(out.contains("  = note: some context"));
        assert!(out.contains("  = help: try this"));
    }

    #[test]
    fn test_suggestion_with_replacement() {
        let diag = Diagnostic::error("missing quote").with_suggestion(crate::Suggestion::new(
            Span::new(1, 5, 5),
            "\"",
            "close the string",
        ));
        let out = render(&diag, None);
        assert!(out.contains("  = help: close the string: `\"`"));
    }

    #[test]
    fn test_invalid_span_skips_snippet() {
        let locator = TestLocator {
            name: "main.zl",
            source: "let x = 1;",
        };
        let diag = Diagnostic::error("boom").with_primary_span(Span::INVALID, "");
        let out = render(&diag, Some(&locator));
        assert!(!out.contains("-->"));
    }

    #[test]
    fn test_summary_single_error() {
        let renderer = AnsiRenderer::new(AnsiStyle::plain());
        let stats = DiagnosticStats {
            error_count: 1,
            ..DiagnosticStats::default()
        };
        let out = renderer.render_summary(&stats);
        assert!(out.contains("aborting due to 1 previous error"));
    }

    #[test]
    fn test_summary_errors_and_warnings() {
        let renderer = AnsiRenderer::new(AnsiStyle::plain());
        let mut stats = DiagnosticStats {
            error_count: 3,
            warning_count: 2,
            ..DiagnosticStats::default()
        };
        stats
            .unique_error_codes
            .insert(ErrorCode::new(ErrorCategory::Lexer, 1012));
        let out = renderer.render_summary(&stats);
        assert!(out.contains("aborting due to 3 previous errors; 2 warnings emitted"));
        assert!(out.contains("`zelc --explain L1012`"));
    }

    #[test]
    fn test_summary_warnings_only() {
        let renderer = AnsiRenderer::new(AnsiStyle::plain());
        let stats = DiagnosticStats {
            warning_count: 1,
            ..DiagnosticStats::default()
        };
        let out = renderer.render_summary(&stats);
        assert!(out.contains("warning: 1 warning emitted"));
    }

    #[test]
    fn test_summary_empty() {
        let renderer = AnsiRenderer::new(AnsiStyle::plain());
        assert!(renderer.render_summary(&DiagnosticStats::default()).is_empty());
    }

    #[test]
    fn test_colored_output_contains_escapes() {
        let mut emitter = TextEmitter::new(Vec::new(), AnsiStyle::default());
        emitter.emit(&Diagnostic::error("boom"), None);
        let out = String::from_utf8(emitter.into_inner()).unwrap();
        assert!(out.contains("\x1b[91m"));
        assert!(out.contains("\x1b[1m"));
    }
}
