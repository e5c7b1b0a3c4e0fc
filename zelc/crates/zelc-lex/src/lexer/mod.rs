//! Lexer facade.
//!
//! [`Lexer`] coordinates the five scanners over one source buffer. Two
//! modes are provided:
//!
//! - basic: whitespace and comments are skipped, only significant tokens
//!   are returned
//! - trivia-preserving: whitespace, newlines, and comments are attached to
//!   the tokens they surround, for formatters and IDE tooling
//!
//! Scanners run in a fixed priority order: string literal, identifier or
//! keyword, number, operator or delimiter, then the unknown-character
//! fallback. The fallback always advances, so tokenization terminates on
//! any input.

mod comment;
mod identifier;
mod number;
mod operator;
mod string;

pub use comment::CommentScanner;
pub use identifier::IdentScanner;
pub use number::NumberScanner;
pub use operator::OperatorScanner;
pub use string::StringScanner;

use crate::error::{ErrorCollector, LexerError, LexerErrorCode};
use crate::scanner::ScanContext;
use crate::source_manager::{BufferId, SourceManager};
use crate::source_reader::SourceReader;
use crate::token::{Token, TokenKind, Trivia, TriviaKind};

/// The lexer for one source buffer.
///
/// Holds one cursor, one error collector, and the scanner set. Stateless
/// between calls apart from the cursor position, so re-tokenizing the same
/// buffer with a fresh `Lexer` yields an identical stream.
///
/// Multiple files may be lexed concurrently with one `Lexer` per buffer,
/// each over its own [`SourceManager`].
///
/// # Examples
///
/// ```
/// use zelc_lex::{Lexer, SourceManager, TokenKind};
///
/// let mut sm = SourceManager::new();
/// let buffer = sm.add_buffer("let x = 42;", "main.zl");
/// let mut lexer = Lexer::new(&sm, buffer);
///
/// let tokens = lexer.tokenize();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::KwLet,
///         TokenKind::Identifier,
///         TokenKind::OpAssign,
///         TokenKind::LitInt,
///         TokenKind::DelimSemicolon,
///         TokenKind::Eof,
///     ]
/// );
/// ```
pub struct Lexer<'sm> {
    sm: &'sm SourceManager,
    reader: SourceReader<'sm>,
    errors: ErrorCollector,
    ident_scanner: IdentScanner,
    number_scanner: NumberScanner,
    string_scanner: StringScanner,
    comment_scanner: CommentScanner,
    operator_scanner: OperatorScanner,
}

impl<'sm> Lexer<'sm> {
    /// Create a lexer over one buffer of the arena
    pub fn new(sm: &'sm SourceManager, buffer: BufferId) -> Self {
        Self {
            sm,
            reader: SourceReader::new(sm, buffer),
            errors: ErrorCollector::new(),
            ident_scanner: IdentScanner,
            number_scanner: NumberScanner,
            string_scanner: StringScanner,
            comment_scanner: CommentScanner,
            operator_scanner: OperatorScanner,
        }
    }

    /// Get the next significant token.
    ///
    /// Skips whitespace and comments. Returns a zero-length EOF token at
    /// end of input.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        if self.reader.is_at_end() {
            return Token::make_eof(self.reader.location());
        }

        self.scan_token()
    }

    /// Tokenize the whole buffer, including the trailing EOF token
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(1024);
        loop {
            let token = self.next_token();
            let kind = token.kind();
            tokens.push(token);
            if kind == TokenKind::Eof {
                break;
            }
        }
        tokens
    }

    /// Get the next token with leading and trailing trivia attached.
    ///
    /// Leading trivia is everything before the token; trailing trivia is
    /// same-line whitespace and the line comment that follows it. A
    /// trailing comment belongs to the token it follows, not the next one.
    pub fn next_token_with_trivia(&mut self) -> Token {
        let leading = self.collect_leading_trivia();

        if self.reader.is_at_end() {
            let mut eof = Token::make_eof(self.reader.location());
            eof.set_leading_trivia(leading);
            return eof;
        }

        let mut token = self.scan_token();
        token.set_leading_trivia(leading);
        token.set_trailing_trivia(self.collect_trailing_trivia());
        token
    }

    /// Tokenize the whole buffer in trivia-preserving mode
    pub fn tokenize_with_trivia(&mut self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(1024);
        loop {
            let token = self.next_token_with_trivia();
            let kind = token.kind();
            tokens.push(token);
            if kind == TokenKind::Eof {
                break;
            }
        }
        tokens
    }

    /// Get the errors collected so far
    pub fn errors(&self) -> &[LexerError] {
        self.errors.errors()
    }

    /// Returns true if any error was collected
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// Get the source arena this lexer reads from
    pub fn source_manager(&self) -> &'sm SourceManager {
        self.sm
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.reader.current() {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                self.reader.advance();
            } else {
                break;
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.skip_whitespace();

            let mut ctx = ScanContext::new(&mut self.reader, &mut self.errors);
            if self.comment_scanner.can_scan(&ctx) {
                let _ = self.comment_scanner.scan(&mut ctx);
                continue;
            }
            break;
        }
    }

    fn collect_leading_trivia(&mut self) -> Vec<Trivia> {
        let mut trivia = Vec::new();
        let buffer = self.reader.buffer();

        loop {
            let Some(b) = self.reader.current() else {
                break;
            };

            match b {
                b' ' | b'\t' => {
                    let start = self.reader.offset();
                    while matches!(self.reader.current(), Some(b' ') | Some(b'\t')) {
                        self.reader.advance();
                    }
                    trivia.push(Trivia {
                        kind: TriviaKind::Whitespace,
                        buffer,
                        offset: start as u32,
                        length: (self.reader.offset() - start) as u16,
                    });
                },
                b'\n' | b'\r' => {
                    let start = self.reader.offset();
                    self.reader.advance();
                    trivia.push(Trivia {
                        kind: TriviaKind::Newline,
                        buffer,
                        offset: start as u32,
                        length: (self.reader.offset() - start) as u16,
                    });
                },
                _ => {
                    let start = self.reader.offset();
                    let mut ctx = ScanContext::new(&mut self.reader, &mut self.errors);
                    if self.comment_scanner.can_scan(&ctx) {
                        let _ = self.comment_scanner.scan(&mut ctx);
                        let length = (self.reader.offset() - start) as u16;
                        trivia.push(Trivia {
                            kind: TriviaKind::Comment,
                            buffer,
                            offset: start as u32,
                            length,
                        });
                    } else {
                        break;
                    }
                },
            }
        }

        trivia
    }

    fn collect_trailing_trivia(&mut self) -> Vec<Trivia> {
        let mut trivia = Vec::new();
        let buffer = self.reader.buffer();

        // Only same-line whitespace and a line comment; the newline itself
        // becomes the next token's leading trivia.
        loop {
            let Some(b) = self.reader.current() else {
                break;
            };

            match b {
                b' ' | b'\t' => {
                    let start = self.reader.offset();
                    while matches!(self.reader.current(), Some(b' ') | Some(b'\t')) {
                        self.reader.advance();
                    }
                    trivia.push(Trivia {
                        kind: TriviaKind::Whitespace,
                        buffer,
                        offset: start as u32,
                        length: (self.reader.offset() - start) as u16,
                    });
                },
                b'/' if self.reader.peek(1) == Some(b'/') => {
                    let start = self.reader.offset();
                    let mut ctx = ScanContext::new(&mut self.reader, &mut self.errors);
                    let _ = self.comment_scanner.scan(&mut ctx);
                    trivia.push(Trivia {
                        kind: TriviaKind::Comment,
                        buffer,
                        offset: start as u32,
                        length: (self.reader.offset() - start) as u16,
                    });
                },
                _ => break,
            }
        }

        trivia
    }

    /// Scan one token at the current position, trying the scanners in
    /// priority order.
    fn scan_token(&mut self) -> Token {
        let mut ctx = ScanContext::new(&mut self.reader, &mut self.errors);

        if self.string_scanner.can_scan(&ctx) {
            return self.string_scanner.scan(&mut ctx);
        }

        if self.ident_scanner.can_scan(&ctx) {
            return self.ident_scanner.scan(&mut ctx);
        }

        if self.number_scanner.can_scan(&ctx) {
            return self.number_scanner.scan(&mut ctx);
        }

        if self.operator_scanner.can_scan(&ctx) {
            return self.operator_scanner.scan(&mut ctx);
        }

        scan_unknown(&mut ctx)
    }
}

/// Fallback for characters no scanner claims.
///
/// Reports an invalid-character error and advances exactly one byte, so
/// the scan loop always makes progress.
fn scan_unknown(ctx: &mut ScanContext<'_, '_>) -> Token {
    let start_offset = ctx.offset();
    let start_loc = ctx.location();

    if let Some(b) = ctx.current() {
        let display = if b.is_ascii_graphic() || b == b' ' {
            (b as char).to_string()
        } else {
            format!("\\x{b:02X}")
        };
        ctx.report(LexerError::new(
            LexerErrorCode::InvalidCharacter,
            start_loc,
            format!("invalid character '{display}'"),
        ));
        ctx.advance();
    }

    ctx.make_unknown(start_offset, start_loc)
}
