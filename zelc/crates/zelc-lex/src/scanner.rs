//! Scan context - the scanners' view of the world.
//!
//! [`ScanContext`] bundles cursor access and error reporting behind one
//! interface so the individual scanners depend on neither the reader nor
//! the collector directly. Every scanner exposes two operations:
//!
//! - `can_scan(&ScanContext) -> bool` - peek-only, no side effects
//! - `scan(&mut ScanContext) -> Token` - consumes input; must make forward
//!   progress even on error, so the overall scan loop always terminates

use crate::error::{ErrorCollector, LexerError, LexerErrorCode};
use crate::source_manager::BufferId;
use crate::source_reader::{Slice, SourceReader};
use crate::token::{SourceLocation, Token, TokenKind, TokenSpan};

/// Unified access for scanners: cursor movement plus error reporting.
pub struct ScanContext<'r, 'sm> {
    reader: &'r mut SourceReader<'sm>,
    errors: &'r mut ErrorCollector,
}

impl<'r, 'sm> ScanContext<'r, 'sm> {
    /// Create a scan context over a reader and an error collector
    pub fn new(reader: &'r mut SourceReader<'sm>, errors: &'r mut ErrorCollector) -> Self {
        Self { reader, errors }
    }

    /// Get the current byte, or `None` at end of input
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.reader.current()
    }

    /// Peek at the byte `offset` positions ahead
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<u8> {
        self.reader.peek(offset)
    }

    /// Returns true at end of input
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.reader.is_at_end()
    }

    /// Capture the current source location
    #[inline]
    pub fn location(&self) -> SourceLocation {
        self.reader.location()
    }

    /// Get the current byte offset
    #[inline]
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }

    /// Get the buffer handle
    #[inline]
    pub fn buffer(&self) -> BufferId {
        self.reader.buffer()
    }

    /// Advance one byte
    #[inline]
    pub fn advance(&mut self) {
        self.reader.advance();
    }

    /// Advance `count` bytes
    #[inline]
    pub fn advance_by(&mut self, count: usize) {
        self.reader.advance_by(count);
    }

    /// Check whether the current byte equals `expected` without consuming
    #[inline]
    pub fn check(&self, expected: u8) -> bool {
        self.current() == Some(expected)
    }

    /// Consume the current byte if it equals `expected`
    pub fn match_byte(&mut self, expected: u8) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Capture the slice from `start_offset` to the current position
    #[inline]
    pub fn slice_from(&self, start_offset: usize) -> Slice {
        self.reader.slice_from(start_offset)
    }

    /// Get the text from `start_offset` to the current position
    #[inline]
    pub fn text_from(&self, start_offset: usize) -> &'sm str {
        self.reader.text_from(start_offset)
    }

    /// Report a lexer error
    pub fn report(&mut self, error: LexerError) {
        self.errors.add(error);
    }

    /// Returns true if any error was reported so far
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// Build a token spanning from `start_offset` to the current position.
    ///
    /// A token longer than the maximum recordable length is clamped and
    /// reported as `TokenTooLong`.
    pub fn make_token(
        &mut self,
        kind: TokenKind,
        start_offset: usize,
        start_loc: SourceLocation,
    ) -> Token {
        let slice = self.slice_from(start_offset);
        if slice.truncated {
            self.report(LexerError::new(
                LexerErrorCode::TokenTooLong,
                start_loc,
                format!(
                    "token length {} exceeds the maximum of {} bytes",
                    self.offset() - start_offset,
                    crate::source_reader::MAX_TOKEN_LENGTH
                ),
            ));
        }
        Token::new(
            kind,
            TokenSpan::new(self.buffer(), slice.offset, slice.length, start_loc),
        )
    }

    /// Build an Unknown token from `start_offset` to the current position
    pub fn make_unknown(&mut self, start_offset: usize, start_loc: SourceLocation) -> Token {
        self.make_token(TokenKind::Unknown, start_offset, start_loc)
    }
}
