//! zelc-diag - Diagnostics Engine for the Zel Compiler
//!
//! This crate is the shared diagnostic infrastructure used by every compiler
//! phase. It provides:
//!
//! - [`Span`] / [`MultiSpan`] - span-addressed source locations
//! - [`Diagnostic`] - structured, leveled reports built with a fluent API
//! - [`ErrorCode`] / [`ErrorRegistry`] - searchable, centrally registered codes
//! - [`DiagContext`] - the thread-safe sink applying -Werror promotion,
//!   deduplication, counting, and error limiting
//! - [`ErrorGuaranteed`] - type-level proof that an error was reported
//! - [`emitter`] - pluggable renderers (ANSI terminal text, JSON)
//! - [`i18n`] - localizable messages with English fallback
//!
//! The engine never touches source text directly; renderers resolve spans
//! through an injected [`SourceLocator`], so any phase can plug in its own
//! storage.
//!
//! # Example
//!
//! ```
//! use zelc_diag::{
//!     emitter::TextEmitter, AnsiStyle, DiagConfig, DiagContext, Diagnostic,
//!     ErrorCategory, ErrorCode, Span,
//! };
//!
//! let emitter = TextEmitter::new(Vec::new(), AnsiStyle::plain());
//! let dcx = DiagContext::new(Box::new(emitter), DiagConfig::default());
//!
//! let guarantee = dcx.emit_error(
//!     Diagnostic::error("unterminated string literal")
//!         .with_code(ErrorCode::new(ErrorCategory::Lexer, 1012))
//!         .with_primary_span(Span::new(1, 8, 9), "string starts here"),
//! );
//!
//! assert!(dcx.has_errors());
//! let _proof = guarantee;
//! ```

#![warn(missing_docs)]

mod context;
mod diagnostic;
mod error_code;
pub mod emitter;
mod guarantee;
pub mod i18n;
mod source_locator;
mod span;

pub use context::{DiagConfig, DiagContext, DiagnosticStats};
pub use diagnostic::{Applicability, Diagnostic, Level, SubDiagnostic, Suggestion};
pub use emitter::{render_markdown, strip_markdown, AnsiRenderer, AnsiStyle, JsonEmitter, TextEmitter};
pub use error_code::{ErrorCategory, ErrorCode, ErrorEntry, ErrorRegistry};
pub use guarantee::ErrorGuaranteed;
pub use i18n::{Locale, LocaleGuard, Translator};
pub use source_locator::{LineColumn, SourceLocator};
pub use span::{LabeledSpan, MultiSpan, Span};
