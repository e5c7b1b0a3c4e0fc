//! Bridging layer: lexer errors into the diagnostics engine.
//!
//! The only place a [`LexerError`] becomes a [`Diagnostic`]. Labels and
//! help text are resolved through the translator under the error's
//! localization key (`<key>.label`, `<key>.help`); missing translations
//! simply leave those parts off.

use std::sync::Once;

use zelc_diag::{
    DiagContext, Diagnostic, ErrorCategory, ErrorCode, ErrorGuaranteed, ErrorRegistry,
    SourceLocator, Span, Translator,
};

use crate::error::{LexerError, LexerErrorCode};

/// Register the lexer's error codes with the global registry.
///
/// Idempotent and cheap to call more than once.
pub fn register_error_codes() {
    static REGISTERED: Once = Once::new();
    REGISTERED.call_once(|| {
        let registry = ErrorRegistry::global();
        for code in LexerErrorCode::ALL {
            registry.register(diag_code(code), code.brief(), code.i18n_key());
        }
    });
}

/// Map a lexer error code to its diagnostics-engine code (`L<nnnn>`)
pub fn diag_code(code: LexerErrorCode) -> ErrorCode {
    ErrorCode::new(ErrorCategory::Lexer, code.code())
}

/// Convert one lexer error into a diagnostic.
///
/// The primary span is a point at the error location; the renderer widens
/// zero-length carets to one column.
pub fn error_to_diagnostic(error: &LexerError, translator: &Translator) -> Diagnostic {
    let key = error.code.i18n_key();
    let label = translator.get(&format!("{key}.label"));
    let span = Span::point(error.location.buffer.as_u32(), error.location.offset);

    let mut diag = Diagnostic::error(error.message.clone())
        .with_code(diag_code(error.code))
        .with_primary_span(span, label);

    let help = translator.get(&format!("{key}.help"));
    if !help.is_empty() {
        diag = diag.with_help(help);
    }

    diag
}

/// Report a batch of lexer errors into a diagnostic context.
///
/// Returns proof that an error was emitted when the batch was non-empty.
pub fn report_errors(
    errors: &[LexerError],
    dcx: &DiagContext,
    locator: Option<&dyn SourceLocator>,
) -> Option<ErrorGuaranteed> {
    register_error_codes();

    let mut guarantee = None;
    for error in errors {
        let diag = error_to_diagnostic(error, dcx.translator());
        guarantee = Some(dcx.emit_error_with_locator(diag, locator));
    }
    guarantee
}
