//! Source reader - cursor movement over one buffer.
//!
//! [`SourceReader`] wraps a buffer from the [`SourceManager`] and provides
//! byte-level peek/advance with line and column tracking. It does not own
//! the source; the view stays valid for the arena's lifetime.
//!
//! Newlines are tracked positionally: `\r\n` counts as a single line break
//! (the `\r` does not bump the line counter, the `\n` after it does), and a
//! lone `\r` is a line break of its own. Columns count UTF-8 characters:
//! continuation bytes do not advance the column.

use crate::source_manager::{BufferId, SourceManager};
use crate::token::SourceLocation;
use crate::utf8;

/// Maximum recordable token length in bytes.
///
/// Token lengths are stored as `u16`; a longer token is clamped and
/// reported as a `TokenTooLong` lexer error.
pub const MAX_TOKEN_LENGTH: usize = u16::MAX as usize;

/// A slice of the current buffer, as offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    /// Start byte offset
    pub offset: u32,
    /// Byte length (clamped to [`MAX_TOKEN_LENGTH`])
    pub length: u16,
    /// True if the real length exceeded [`MAX_TOKEN_LENGTH`]
    pub truncated: bool,
}

/// A cursor over one source buffer.
///
/// # Example
///
/// ```
/// use zelc_lex::{SourceManager, SourceReader};
///
/// let mut sm = SourceManager::new();
/// let buffer = sm.add_buffer("let x", "main.zl");
/// let mut reader = SourceReader::new(&sm, buffer);
///
/// assert_eq!(reader.current(), Some(b'l'));
/// reader.advance();
/// assert_eq!(reader.current(), Some(b'e'));
/// ```
pub struct SourceReader<'sm> {
    buffer: BufferId,
    source: &'sm str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'sm> SourceReader<'sm> {
    /// Create a reader over one buffer of the arena
    pub fn new(sm: &'sm SourceManager, buffer: BufferId) -> Self {
        Self {
            buffer,
            source: sm.get_source(buffer),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the current byte, or `None` at end of input
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.source.as_bytes().get(self.position).copied()
    }

    /// Peek at the byte `offset` positions ahead
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.position + offset).copied()
    }

    /// Returns true at end of input
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Advance one byte, updating line and column tracking.
    pub fn advance(&mut self) {
        let Some(b) = self.current() else {
            return;
        };

        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if b == b'\r' {
            if self.peek(1) != Some(b'\n') {
                // Lone \r is a line break; \r\n defers to the \n.
                self.line += 1;
                self.column = 1;
            }
        } else if !utf8::is_continuation_byte(b) {
            self.column += 1;
        }

        self.position += 1;
    }

    /// Advance `count` bytes
    pub fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    /// Capture the current source location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.buffer, self.line, self.column, self.position as u32)
    }

    /// Get the buffer handle
    #[inline]
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    /// Get the current byte offset (0-based)
    #[inline]
    pub fn offset(&self) -> usize {
        self.position
    }

    /// Get the current line (1-based)
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Get the current column (1-based, UTF-8 characters)
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Get the full source of the buffer
    #[inline]
    pub fn source(&self) -> &'sm str {
        self.source
    }

    /// Capture the slice from `start_offset` to the current position.
    ///
    /// The length is clamped to [`MAX_TOKEN_LENGTH`]; `truncated` records
    /// whether clamping happened.
    pub fn slice_from(&self, start_offset: usize) -> Slice {
        let len = self.position.saturating_sub(start_offset);
        Slice {
            offset: start_offset as u32,
            length: len.min(MAX_TOKEN_LENGTH) as u16,
            truncated: len > MAX_TOKEN_LENGTH,
        }
    }

    /// Get the text from `start_offset` to the current position
    pub fn text_from(&self, start_offset: usize) -> &'sm str {
        if start_offset >= self.source.len() || start_offset > self.position {
            return "";
        }
        &self.source[start_offset..self.position]
    }
}
