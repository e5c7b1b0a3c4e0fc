//! Lexer-local error records.
//!
//! These are scan-time facts about malformed input, deliberately separate
//! from the general diagnostics engine: every scanner guarantees forward
//! progress after reporting one, so a single pass can report every problem
//! in a file. The [`report`](crate::report) module is the only place where
//! a [`LexerError`] becomes a diagnostic.

use crate::source_manager::SourceManager;
use crate::token::SourceLocation;

/// Lexer error codes.
///
/// Explicit numeric values, grouped by concern:
/// - 1001-1010: numeric literals
/// - 1011-1020: string literals
/// - 1021-1030: characters and encoding
/// - 1031-1040: comments
/// - 1041-1050: generic limits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum LexerErrorCode {
    /// No digits after a "0x" prefix
    MissingHexDigits = 1001,
    /// No digits after a "0b" prefix
    MissingBinaryDigits = 1002,
    /// No digits after a "0o" prefix
    MissingOctalDigits = 1003,
    /// No digits in a float exponent
    MissingExponentDigits = 1004,
    /// Invalid character directly after a numeric literal
    InvalidTrailingChar = 1005,
    /// Invalid numeric type suffix
    InvalidNumberSuffix = 1006,

    /// Invalid escape sequence
    InvalidEscapeSequence = 1011,
    /// String literal not closed
    UnterminatedString = 1012,
    /// Invalid hex escape (`\xHH`)
    InvalidHexEscape = 1013,
    /// Invalid unicode escape (`\u{...}`)
    InvalidUnicodeEscape = 1014,
    /// Raw string literal not closed
    UnterminatedRawString = 1015,

    /// Character not valid in source
    InvalidCharacter = 1021,
    /// Malformed UTF-8 byte sequence
    InvalidUtf8Sequence = 1022,

    /// Block comment not closed
    UnterminatedBlockComment = 1031,

    /// Token exceeds the maximum token length
    TokenTooLong = 1041,
}

impl LexerErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Get the code string, e.g. `"L1012"`
    pub fn code_string(self) -> String {
        format!("L{:04}", self.code())
    }

    /// Get a short English description
    pub const fn brief(self) -> &'static str {
        match self {
            LexerErrorCode::MissingHexDigits => "missing digits after hexadecimal prefix",
            LexerErrorCode::MissingBinaryDigits => "missing digits after binary prefix",
            LexerErrorCode::MissingOctalDigits => "missing digits after octal prefix",
            LexerErrorCode::MissingExponentDigits => "missing digits in float exponent",
            LexerErrorCode::InvalidTrailingChar => "invalid character after numeric literal",
            LexerErrorCode::InvalidNumberSuffix => "invalid numeric suffix",
            LexerErrorCode::InvalidEscapeSequence => "invalid escape sequence",
            LexerErrorCode::UnterminatedString => "unterminated string literal",
            LexerErrorCode::InvalidHexEscape => "invalid hexadecimal escape",
            LexerErrorCode::InvalidUnicodeEscape => "invalid unicode escape",
            LexerErrorCode::UnterminatedRawString => "unterminated raw string literal",
            LexerErrorCode::InvalidCharacter => "invalid character",
            LexerErrorCode::InvalidUtf8Sequence => "malformed UTF-8 sequence",
            LexerErrorCode::UnterminatedBlockComment => "unterminated block comment",
            LexerErrorCode::TokenTooLong => "token exceeds maximum length",
        }
    }

    /// Get the localization key prefix for this code
    pub const fn i18n_key(self) -> &'static str {
        match self {
            LexerErrorCode::MissingHexDigits => "lexer.missing_hex_digits",
            LexerErrorCode::MissingBinaryDigits => "lexer.missing_binary_digits",
            LexerErrorCode::MissingOctalDigits => "lexer.missing_octal_digits",
            LexerErrorCode::MissingExponentDigits => "lexer.missing_exponent_digits",
            LexerErrorCode::InvalidTrailingChar => "lexer.invalid_trailing_char",
            LexerErrorCode::InvalidNumberSuffix => "lexer.invalid_number_suffix",
            LexerErrorCode::InvalidEscapeSequence => "lexer.invalid_escape_sequence",
            LexerErrorCode::UnterminatedString => "lexer.unterminated_string",
            LexerErrorCode::InvalidHexEscape => "lexer.invalid_hex_escape",
            LexerErrorCode::InvalidUnicodeEscape => "lexer.invalid_unicode_escape",
            LexerErrorCode::UnterminatedRawString => "lexer.unterminated_raw_string",
            LexerErrorCode::InvalidCharacter => "lexer.invalid_character",
            LexerErrorCode::InvalidUtf8Sequence => "lexer.invalid_utf8_sequence",
            LexerErrorCode::UnterminatedBlockComment => "lexer.unterminated_block_comment",
            LexerErrorCode::TokenTooLong => "lexer.token_too_long",
        }
    }

    /// All codes, for registration
    pub const ALL: [LexerErrorCode; 15] = [
        LexerErrorCode::MissingHexDigits,
        LexerErrorCode::MissingBinaryDigits,
        LexerErrorCode::MissingOctalDigits,
        LexerErrorCode::MissingExponentDigits,
        LexerErrorCode::InvalidTrailingChar,
        LexerErrorCode::InvalidNumberSuffix,
        LexerErrorCode::InvalidEscapeSequence,
        LexerErrorCode::UnterminatedString,
        LexerErrorCode::InvalidHexEscape,
        LexerErrorCode::InvalidUnicodeEscape,
        LexerErrorCode::UnterminatedRawString,
        LexerErrorCode::InvalidCharacter,
        LexerErrorCode::InvalidUtf8Sequence,
        LexerErrorCode::UnterminatedBlockComment,
        LexerErrorCode::TokenTooLong,
    ];
}

/// One lexer error, with a pre-formatted message.
///
/// Pre-formatting keeps reporting cheap at the call site and makes the
/// record self-contained: callers batch-report every problem in a file
/// after the scan finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerError {
    /// The error code
    pub code: LexerErrorCode,
    /// Where the error occurred
    pub location: SourceLocation,
    /// The formatted message
    pub message: String,
}

impl LexerError {
    /// Create an error record
    pub fn new(code: LexerErrorCode, location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            code,
            location,
            message: message.into(),
        }
    }

    /// Get the code string, e.g. `"L1012"`
    pub fn code_string(&self) -> String {
        self.code.code_string()
    }
}

/// Collects lexer errors during one scan pass.
///
/// Scanners report through this; nothing is emitted until a caller decides
/// to bridge the collected errors into the diagnostics engine.
#[derive(Clone, Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<LexerError>,
}

impl ErrorCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error
    pub fn add(&mut self, error: LexerError) {
        self.errors.push(error);
    }

    /// Get all collected errors
    #[inline]
    pub fn errors(&self) -> &[LexerError] {
        &self.errors
    }

    /// Returns true if any error was collected
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of collected errors
    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no errors were collected
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Clear all collected errors
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Get the macro-expansion chain for an error location.
///
/// Forward-compatibility seam: once the macro system records expansions,
/// this walks from the error's location back to the original call site.
/// Today no expansions exist, so the chain is always empty.
pub fn expansion_chain(_error: &LexerError, _sm: &SourceManager) -> Vec<SourceLocation> {
    Vec::new()
}
