//! Diagnostic context - the shared, thread-safe diagnostic sink.
//!
//! [`DiagContext`] is the one piece of shared mutable state in the
//! diagnostics engine. Every compiler phase reports into it; it applies
//! warning promotion, deduplication, counting, and error limiting before
//! forwarding to the configured [`Emitter`].
//!
//! # Examples
//!
//! ```
//! use zelc_diag::{DiagConfig, DiagContext, Diagnostic, emitter::TextEmitter, AnsiStyle};
//!
//! let emitter = TextEmitter::new(Vec::new(), AnsiStyle::plain());
//! let dcx = DiagContext::new(Box::new(emitter), DiagConfig::default());
//!
//! let guarantee = dcx.emit_error(Diagnostic::error("something went wrong"));
//! assert!(dcx.has_errors());
//! let _proof = guarantee;
//! ```

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::emitter::Emitter;
use crate::i18n::Translator;
use crate::{Diagnostic, ErrorCode, ErrorGuaranteed, Level, SourceLocator};

/// Diagnostic processing configuration
#[derive(Clone, Debug)]
pub struct DiagConfig {
    /// Drop diagnostics identical in message, code, and primary position
    pub deduplicate: bool,
    /// Maximum number of errors to forward to the emitter (0 = unlimited)
    pub max_errors: usize,
    /// Promote warnings to errors (-Werror)
    pub treat_warnings_as_errors: bool,
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self {
            deduplicate: true,
            max_errors: 0,
            treat_warnings_as_errors: false,
        }
    }
}

/// Running counters owned by a [`DiagContext`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticStats {
    /// Number of error-level diagnostics (Error, Fatal, Bug)
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of notes and helps
    pub note_count: usize,
    /// Distinct error codes seen on error-level diagnostics
    pub unique_error_codes: BTreeSet<ErrorCode>,
}

impl DiagnosticStats {
    /// Returns true if any errors were counted
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Total number of diagnostics counted
    #[inline]
    pub fn total(&self) -> usize {
        self.error_count + self.warning_count + self.note_count
    }
}

/// Hash a diagnostic's identity for deduplication.
///
/// Identity is the message text, the error code, and the primary span's
/// file + start offset. Two diagnostics with the same identity are
/// considered duplicates.
fn diagnostic_hash(diag: &Diagnostic) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    diag.message.hash(&mut hasher);
    diag.code.hash(&mut hasher);
    if let Some(span) = diag.primary_span() {
        span.file_id.hash(&mut hasher);
        span.start.hash(&mut hasher);
    }
    hasher.finish()
}

/// Mutable state guarded by the context mutex.
struct Inner {
    emitter: Box<dyn Emitter + Send>,
    stats: DiagnosticStats,
    had_fatal: bool,
    seen_hashes: FxHashSet<u64>,
}

/// The shared diagnostic sink.
///
/// `emit`, the counters, and `flush` are safe to call from multiple threads;
/// each emit is atomic with respect to the counters and the dedup set.
/// Callers must not assume any ordering between concurrent emitters.
pub struct DiagContext {
    config: DiagConfig,
    translator: Translator,
    inner: Mutex<Inner>,
}

impl DiagContext {
    /// Create a new context with the given emitter and configuration
    pub fn new(emitter: Box<dyn Emitter + Send>, config: DiagConfig) -> Self {
        Self::with_translator(emitter, config, Translator::new())
    }

    /// Create a new context with an explicit translator
    pub fn with_translator(
        emitter: Box<dyn Emitter + Send>,
        config: DiagConfig,
        translator: Translator,
    ) -> Self {
        Self {
            config,
            translator,
            inner: Mutex::new(Inner {
                emitter,
                stats: DiagnosticStats::default(),
                had_fatal: false,
                seen_hashes: FxHashSet::default(),
            }),
        }
    }

    /// Emit a diagnostic.
    ///
    /// Processing order: -Werror promotion, deduplication, counting,
    /// error-limit suppression, then forwarding to the emitter. A diagnostic
    /// suppressed by the error limit has still been counted.
    pub fn emit(&self, diag: Diagnostic) {
        self.emit_with_locator(diag, None);
    }

    /// Emit a diagnostic, resolving spans through the given locator
    pub fn emit_with_locator(&self, mut diag: Diagnostic, locator: Option<&dyn SourceLocator>) {
        let mut inner = self.inner.lock();

        if self.config.treat_warnings_as_errors && diag.level == Level::Warning {
            diag.level = Level::Error;
        }

        if self.config.deduplicate {
            let hash = diagnostic_hash(&diag);
            if !inner.seen_hashes.insert(hash) {
                return;
            }
        }

        match diag.level {
            Level::Error | Level::Bug => {
                inner.stats.error_count += 1;
                if let Some(code) = diag.code {
                    inner.stats.unique_error_codes.insert(code);
                }
            },
            Level::Fatal => {
                inner.stats.error_count += 1;
                inner.had_fatal = true;
                if let Some(code) = diag.code {
                    inner.stats.unique_error_codes.insert(code);
                }
            },
            Level::Warning => {
                inner.stats.warning_count += 1;
            },
            Level::Note | Level::Help => {
                inner.stats.note_count += 1;
            },
        }

        // The max-errors-th error is still emitted; later ones are counted
        // but suppressed.
        if self.config.max_errors > 0 && inner.stats.error_count > self.config.max_errors {
            return;
        }

        inner.emitter.emit(&diag, locator);
    }

    /// Emit an error-level diagnostic and obtain proof it was emitted.
    ///
    /// A diagnostic below `Error` level is promoted to `Error` first. This
    /// is the only way to obtain an [`ErrorGuaranteed`].
    pub fn emit_error(&self, diag: Diagnostic) -> ErrorGuaranteed {
        self.emit_error_with_locator(diag, None)
    }

    /// Emit an error-level diagnostic with a locator
    pub fn emit_error_with_locator(
        &self,
        mut diag: Diagnostic,
        locator: Option<&dyn SourceLocator>,
    ) -> ErrorGuaranteed {
        if diag.level < Level::Error {
            diag.level = Level::Error;
        }
        self.emit_with_locator(diag, locator);
        ErrorGuaranteed::new_unchecked()
    }

    /// Get the number of errors emitted so far
    pub fn error_count(&self) -> usize {
        self.inner.lock().stats.error_count
    }

    /// Get the number of warnings emitted so far
    pub fn warning_count(&self) -> usize {
        self.inner.lock().stats.warning_count
    }

    /// Returns true if any errors were counted
    pub fn has_errors(&self) -> bool {
        self.inner.lock().stats.error_count > 0
    }

    /// Obtain an [`ErrorGuaranteed`] if at least one error was emitted
    pub fn error_guaranteed(&self) -> Option<ErrorGuaranteed> {
        if self.has_errors() {
            Some(ErrorGuaranteed::new_unchecked())
        } else {
            None
        }
    }

    /// Returns true once a fatal diagnostic was seen or the error limit
    /// was reached.
    ///
    /// Callers poll this at phase boundaries, not mid-scan.
    pub fn should_abort(&self) -> bool {
        let inner = self.inner.lock();
        if inner.had_fatal {
            return true;
        }
        self.config.max_errors > 0 && inner.stats.error_count >= self.config.max_errors
    }

    /// Get a snapshot of the running counters
    pub fn stats(&self) -> DiagnosticStats {
        self.inner.lock().stats.clone()
    }

    /// Ask the emitter to render a closing summary
    pub fn emit_summary(&self) {
        let mut inner = self.inner.lock();
        let stats = inner.stats.clone();
        inner.emitter.emit_summary(&stats);
    }

    /// Flush the emitter's output
    pub fn flush(&self) {
        self.inner.lock().emitter.flush();
    }

    /// Get the configuration
    pub fn config(&self) -> &DiagConfig {
        &self.config
    }

    /// Get the translator
    pub fn translator(&self) -> &Translator {
        &self.translator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;

    /// Emitter that records what reaches it.
    struct RecordingEmitter {
        emitted: std::sync::Arc<Mutex<Vec<Diagnostic>>>,
    }

    fn recording_context(
        config: DiagConfig,
    ) -> (DiagContext, std::sync::Arc<Mutex<Vec<Diagnostic>>>) {
        let emitted = std::sync::Arc::new(Mutex::new(Vec::new()));
        let emitter = RecordingEmitter {
            emitted: emitted.clone(),
        };
        (DiagContext::new(Box::new(emitter), config), emitted)
    }

    impl Emitter for RecordingEmitter {
        fn emit(&mut self, diag: &Diagnostic, _locator: Option<&dyn SourceLocator>) {
            self.emitted.lock().push(diag.clone());
        }

        fn emit_summary(&mut self, _stats: &DiagnosticStats) {}

        fn flush(&mut self) {}
    }

    fn span_diag(message: &str, code: u16, start: u32) -> Diagnostic {
        Diagnostic::error(message)
            .with_code(ErrorCode::new(crate::ErrorCategory::Lexer, code))
            .with_primary_span(Span::new(1, start, start + 1), "")
    }

    #[test]
    fn test_emit_counts_errors() {
        let (dcx, emitted) = recording_context(DiagConfig::default());
        let _g = dcx.emit_error(Diagnostic::error("boom"));

        assert_eq!(dcx.error_count(), 1);
        assert!(dcx.has_errors());
        assert_eq!(emitted.lock().len(), 1);
    }

    #[test]
    fn test_dedup_identical_diagnostic() {
        let (dcx, emitted) = recording_context(DiagConfig::default());
        dcx.emit(span_diag("duplicate", 1012, 5));
        dcx.emit(span_diag("duplicate", 1012, 5));

        // Counted once, emitted once.
        assert_eq!(dcx.error_count(), 1);
        assert_eq!(emitted.lock().len(), 1);
    }

    #[test]
    fn test_dedup_distinguishes_code_and_span() {
        let (dcx, emitted) = recording_context(DiagConfig::default());
        dcx.emit(span_diag("same message", 1012, 5));
        dcx.emit(span_diag("same message", 1013, 5)); // different code
        dcx.emit(span_diag("same message", 1012, 9)); // different span

        assert_eq!(dcx.error_count(), 3);
        assert_eq!(emitted.lock().len(), 3);
    }

    #[test]
    fn test_dedup_disabled() {
        let config = DiagConfig {
            deduplicate: false,
            ..DiagConfig::default()
        };
        let (dcx, emitted) = recording_context(config);
        dcx.emit(span_diag("duplicate", 1012, 5));
        dcx.emit(span_diag("duplicate", 1012, 5));

        assert_eq!(dcx.error_count(), 2);
        assert_eq!(emitted.lock().len(), 2);
    }

    #[test]
    fn test_werror_promotes_warning() {
        let config = DiagConfig {
            treat_warnings_as_errors: true,
            ..DiagConfig::default()
        };
        let (dcx, emitted) = recording_context(config);
        dcx.emit(Diagnostic::warning("unused variable"));

        assert_eq!(dcx.error_count(), 1);
        assert_eq!(dcx.warning_count(), 0);
        assert_eq!(emitted.lock()[0].level, Level::Error);
    }

    #[test]
    fn test_max_errors_suppresses_but_counts() {
        let config = DiagConfig {
            max_errors: 2,
            ..DiagConfig::default()
        };
        let (dcx, emitted) = recording_context(config);
        dcx.emit(span_diag("first", 1001, 0));
        dcx.emit(span_diag("second", 1001, 1));
        dcx.emit(span_diag("third", 1001, 2));

        // All counted, only the first two forwarded.
        assert_eq!(dcx.error_count(), 3);
        assert_eq!(emitted.lock().len(), 2);
        assert!(dcx.should_abort());
    }

    #[test]
    fn test_should_abort_on_fatal() {
        let (dcx, _) = recording_context(DiagConfig::default());
        assert!(!dcx.should_abort());
        dcx.emit(Diagnostic::fatal("cannot continue"));
        assert!(dcx.should_abort());
    }

    #[test]
    fn test_fatal_counts_as_error() {
        let (dcx, _) = recording_context(DiagConfig::default());
        dcx.emit(Diagnostic::fatal("cannot continue"));
        assert_eq!(dcx.error_count(), 1);
    }

    #[test]
    fn test_bug_counts_as_error() {
        let (dcx, _) = recording_context(DiagConfig::default());
        dcx.emit(Diagnostic::bug("impossible state"));
        assert_eq!(dcx.error_count(), 1);
    }

    #[test]
    fn test_notes_and_helps_count_as_notes() {
        let (dcx, _) = recording_context(DiagConfig::default());
        dcx.emit(Diagnostic::note("fyi"));
        dcx.emit(Diagnostic::new(Level::Help, "try this"));

        let stats = dcx.stats();
        assert_eq!(stats.note_count, 2);
        assert_eq!(stats.error_count, 0);
    }

    #[test]
    fn test_unique_error_codes() {
        let (dcx, _) = recording_context(DiagConfig::default());
        dcx.emit(span_diag("a", 1001, 0));
        dcx.emit(span_diag("b", 1001, 1));
        dcx.emit(span_diag("c", 1012, 2));

        let stats = dcx.stats();
        assert_eq!(stats.error_count, 3);
        assert_eq!(stats.unique_error_codes.len(), 2);
    }

    #[test]
    fn test_error_guaranteed_only_after_error() {
        let (dcx, _) = recording_context(DiagConfig::default());
        assert!(dcx.error_guaranteed().is_none());
        let _g = dcx.emit_error(Diagnostic::error("boom"));
        assert!(dcx.error_guaranteed().is_some());
    }

    #[test]
    fn test_emit_error_promotes_low_level() {
        let (dcx, emitted) = recording_context(DiagConfig::default());
        let _g = dcx.emit_error(Diagnostic::note("actually an error"));
        assert_eq!(emitted.lock()[0].level, Level::Error);
        assert_eq!(dcx.error_count(), 1);
    }

    #[test]
    fn test_concurrent_emit() {
        let (dcx, emitted) = recording_context(DiagConfig {
            deduplicate: false,
            ..DiagConfig::default()
        });
        let dcx = std::sync::Arc::new(dcx);

        std::thread::scope(|scope| {
            for t in 0..4u32 {
                let dcx = dcx.clone();
                scope.spawn(move || {
                    for i in 0..50u32 {
                        dcx.emit(span_diag("concurrent", 1001, t * 100 + i));
                    }
                });
            }
        });

        assert_eq!(dcx.error_count(), 200);
        assert_eq!(emitted.lock().len(), 200);
    }
}
