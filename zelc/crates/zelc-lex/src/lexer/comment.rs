//! Comment scanning.
//!
//! `//` starts a line comment (the newline is not consumed), `///` its doc
//! variant. `/*` starts a block comment, `/**` its doc variant (except
//! `/**/`). Block comments do not nest: the first `*/` closes the comment
//! regardless of intervening `/*` sequences.

use crate::error::{LexerError, LexerErrorCode};
use crate::scanner::ScanContext;
use crate::token::{SourceLocation, Token, TokenKind};

/// Scans line, block, and doc comments.
pub struct CommentScanner;

impl CommentScanner {
    /// Check whether the current position starts a comment
    pub fn can_scan(&self, ctx: &ScanContext<'_, '_>) -> bool {
        ctx.current() == Some(b'/') && matches!(ctx.peek(1), Some(b'/') | Some(b'*'))
    }

    /// Scan a comment
    pub fn scan(&self, ctx: &mut ScanContext<'_, '_>) -> Token {
        let start_offset = ctx.offset();
        let start_loc = ctx.location();

        match ctx.peek(1) {
            Some(b'/') => self.scan_line(ctx, start_offset, start_loc),
            Some(b'*') => self.scan_block(ctx, start_offset, start_loc),
            _ => ctx.make_unknown(start_offset, start_loc),
        }
    }

    fn scan_line(
        &self,
        ctx: &mut ScanContext<'_, '_>,
        start_offset: usize,
        start_loc: SourceLocation,
    ) -> Token {
        // Consume "//".
        ctx.advance_by(2);

        let is_doc = ctx.check(b'/');
        if is_doc {
            ctx.advance();
        }

        // Up to but not including the newline; whitespace handling owns it.
        while let Some(b) = ctx.current() {
            if b == b'\n' || b == b'\r' {
                break;
            }
            ctx.advance();
        }

        let kind = if is_doc {
            TokenKind::CommentDoc
        } else {
            TokenKind::CommentLine
        };
        ctx.make_token(kind, start_offset, start_loc)
    }

    fn scan_block(
        &self,
        ctx: &mut ScanContext<'_, '_>,
        start_offset: usize,
        start_loc: SourceLocation,
    ) -> Token {
        // Consume "/*".
        ctx.advance_by(2);

        // "/**" is a doc comment, but "/**/" is just an empty comment.
        let is_doc = ctx.check(b'*') && ctx.peek(1) != Some(b'/');
        if is_doc {
            ctx.advance();
        }

        loop {
            let Some(b) = ctx.current() else {
                ctx.report(LexerError::new(
                    LexerErrorCode::UnterminatedBlockComment,
                    start_loc,
                    "unterminated block comment",
                ));
                break;
            };

            if b == b'*' && ctx.peek(1) == Some(b'/') {
                ctx.advance_by(2);
                break;
            }

            ctx.advance();
        }

        let kind = if is_doc {
            TokenKind::CommentDoc
        } else {
            TokenKind::CommentBlock
        };
        ctx.make_token(kind, start_offset, start_loc)
    }
}
