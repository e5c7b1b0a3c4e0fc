//! Diagnostic types - structured, leveled reports.
//!
//! This module defines the [`Diagnostic`] value type and its parts:
//! [`Level`], [`SubDiagnostic`], [`Suggestion`], and [`Applicability`].
//! Diagnostics are built once through the fluent `with_*` methods and then
//! consumed by [`DiagContext::emit`](crate::DiagContext::emit).
//!
//! # Examples
//!
//! ```
//! use zelc_diag::{Diagnostic, ErrorCategory, ErrorCode, Level, Span};
//!
//! let diag = Diagnostic::error("unterminated string literal")
//!     .with_code(ErrorCode::new(ErrorCategory::Lexer, 1012))
//!     .with_primary_span(Span::new(1, 8, 9), "string starts here")
//!     .with_help("add a closing `\"`");
//! assert!(diag.is_error());
//! ```

use std::fmt;

use crate::{ErrorCode, MultiSpan, Span};

/// Diagnostic severity level
///
/// Levels are ordered: anything at `Error` or above counts as an error.
///
/// # Examples
///
/// ```
/// use zelc_diag::Level;
///
/// assert_eq!(format!("{}", Level::Error), "error");
/// assert!(Level::Fatal > Level::Warning);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Additional information
    Note,
    /// A suggestion for fixing an issue
    Help,
    /// A problem that does not prevent compilation
    Warning,
    /// A problem that prevents compilation
    Error,
    /// An error that aborts the compilation immediately
    Fatal,
    /// An internal compiler error
    Bug,
}

impl Level {
    /// Get the display name for this level
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Note => "note",
            Level::Help => "help",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Bug => "internal compiler error",
        }
    }

    /// Returns true if this level counts as an error
    #[inline]
    pub fn is_error(self) -> bool {
        self >= Level::Error
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How confident a suggestion is
///
/// Indicates whether a code fix can be applied automatically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Applicability {
    /// The fix is definitely correct and can be auto-applied
    MachineApplicable,
    /// The fix contains placeholders that need user input
    HasPlaceholders,
    /// The fix might be correct but requires human verification
    MaybeIncorrect,
    /// Confidence not specified
    #[default]
    Unspecified,
}

/// A suggested code fix
///
/// # Examples
///
/// ```
/// use zelc_diag::{Span, Suggestion};
///
/// let fix = Suggestion::new(Span::new(1, 8, 8), "\"", "add a closing quote");
/// assert_eq!(fix.replacement, "\"");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    /// Where to apply the replacement
    pub span: Span,
    /// The replacement text
    pub replacement: String,
    /// Human-readable description of the fix
    pub message: String,
    /// How confident we are in this fix
    pub applicability: Applicability,
}

impl Suggestion {
    /// Create a new suggestion with unspecified applicability
    pub fn new(span: Span, replacement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
            message: message.into(),
            applicability: Applicability::Unspecified,
        }
    }

    /// Set the applicability
    #[must_use]
    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }
}

/// A sub-diagnostic attached to a parent diagnostic
///
/// Sub-diagnostics carry `Note` or `Help` level content, optionally anchored
/// to a span of their own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubDiagnostic {
    /// `Note` or `Help`
    pub level: Level,
    /// Message content
    pub message: String,
    /// Optional location
    pub span: Option<Span>,
}

impl SubDiagnostic {
    /// Create a new sub-diagnostic
    pub fn new(level: Level, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            level,
            message: message.into(),
            span,
        }
    }
}

/// A structured, leveled diagnostic report
///
/// A diagnostic is an immutable value: build it with the fluent `with_*`
/// methods, then hand it to [`DiagContext::emit`](crate::DiagContext::emit).
/// Messages may use a lightweight Markdown subset (bold, italic, inline
/// code, links, fenced code); the human renderer converts it to ANSI, the
/// JSON renderer strips it.
///
/// # Examples
///
/// ```
/// use zelc_diag::{Diagnostic, Level, Span};
///
/// let diag = Diagnostic::warning("unused variable `x`")
///     .with_primary_span(Span::new(1, 4, 5), "declared here")
///     .with_note("variables are dropped at end of scope");
/// assert_eq!(diag.level, Level::Warning);
/// assert_eq!(diag.children.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "diagnostics should be emitted, not silently dropped"]
pub struct Diagnostic {
    /// Severity level
    pub level: Level,
    /// Main message (Markdown subset)
    pub message: String,
    /// Optional error code
    pub code: Option<ErrorCode>,
    /// Annotated source locations
    pub spans: MultiSpan,
    /// Ordered sub-diagnostics
    pub children: Vec<SubDiagnostic>,
    /// Ordered suggested fixes
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    /// Create a new diagnostic with the given level
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            code: None,
            spans: MultiSpan::new(),
            children: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Create a note diagnostic
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Level::Note, message)
    }

    /// Create a fatal diagnostic
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(Level::Fatal, message)
    }

    /// Create an internal-compiler-error diagnostic
    pub fn bug(message: impl Into<String>) -> Self {
        Self::new(Level::Bug, message)
    }

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary span annotation
    pub fn with_primary_span(mut self, span: Span, label: impl Into<String>) -> Self {
        self.spans.add_primary(span, label);
        self
    }

    /// Add a secondary span annotation
    pub fn with_secondary_span(mut self, span: Span, label: impl Into<String>) -> Self {
        self.spans.add_secondary(span, label);
        self
    }

    /// Add a note sub-diagnostic
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.children
            .push(SubDiagnostic::new(Level::Note, note, None));
        self
    }

    /// Add a help sub-diagnostic
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.children
            .push(SubDiagnostic::new(Level::Help, help, None));
        self
    }

    /// Add a note sub-diagnostic anchored to a span
    pub fn with_span_note(mut self, span: Span, note: impl Into<String>) -> Self {
        self.children
            .push(SubDiagnostic::new(Level::Note, note, Some(span)));
        self
    }

    /// Add a suggested fix
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Returns true if this diagnostic carries an error code
    #[inline]
    pub fn has_code(&self) -> bool {
        self.code.is_some()
    }

    /// Returns true if this diagnostic is at error level or above
    #[inline]
    pub fn is_error(&self) -> bool {
        self.level.is_error()
    }

    /// Get the primary span, if any
    pub fn primary_span(&self) -> Option<Span> {
        self.spans.primary().map(|s| s.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCategory;

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Note.to_string(), "note");
        assert_eq!(Level::Help.to_string(), "help");
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(Level::Error.to_string(), "error");
        assert_eq!(Level::Fatal.to_string(), "fatal");
        assert_eq!(Level::Bug.to_string(), "internal compiler error");
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Note < Level::Help);
        assert!(Level::Help < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Bug);
    }

    #[test]
    fn test_level_is_error() {
        assert!(!Level::Warning.is_error());
        assert!(Level::Error.is_error());
        assert!(Level::Fatal.is_error());
        assert!(Level::Bug.is_error());
    }

    #[test]
    fn test_diagnostic_builder() {
        let code = ErrorCode::new(ErrorCategory::Lexer, 1012);
        let diag = Diagnostic::error("unterminated string literal")
            .with_code(code)
            .with_primary_span(Span::new(1, 8, 9), "string starts here")
            .with_note("strings must close before end of line")
            .with_help("add a closing `\"`");

        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.code, Some(code));
        assert_eq!(diag.primary_span(), Some(Span::new(1, 8, 9)));
        assert_eq!(diag.children.len(), 2);
        assert_eq!(diag.children[0].level, Level::Note);
        assert_eq!(diag.children[1].level, Level::Help);
    }

    #[test]
    fn test_diagnostic_suggestion() {
        let diag = Diagnostic::error("missing semicolon").with_suggestion(
            Suggestion::new(Span::new(1, 10, 10), ";", "add a semicolon")
                .with_applicability(Applicability::MachineApplicable),
        );
        assert_eq!(diag.suggestions.len(), 1);
        assert_eq!(
            diag.suggestions[0].applicability,
            Applicability::MachineApplicable
        );
    }

    #[test]
    fn test_diagnostic_no_spans() {
        let diag = Diagnostic::note("compilation finished");
        assert!(diag.primary_span().is_none());
        assert!(!diag.has_code());
    }
}
