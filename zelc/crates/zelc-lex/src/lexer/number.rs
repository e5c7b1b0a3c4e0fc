//! Numeric literal scanning.
//!
//! Handles decimal, hexadecimal (`0x`), binary (`0b`), and octal (`0o`)
//! integers with `_` digit separators, floats with fraction and exponent
//! parts, and fixed-point literals (`d` / `dec64` suffix).

use crate::error::{LexerError, LexerErrorCode};
use crate::scanner::ScanContext;
use crate::token::{SourceLocation, Token, TokenKind};
use crate::utf8::is_digit_in_base;

/// Scans numeric literals.
///
/// Classification: radix-prefixed literals are always integers; decimal
/// literals are integers unless a fraction, an exponent, or a fixed-point
/// suffix was seen.
pub struct NumberScanner;

impl NumberScanner {
    /// Check whether the current byte starts a number
    pub fn can_scan(&self, ctx: &ScanContext<'_, '_>) -> bool {
        ctx.current().is_some_and(|b| b.is_ascii_digit())
    }

    /// Scan a numeric literal
    pub fn scan(&self, ctx: &mut ScanContext<'_, '_>) -> Token {
        let start_offset = ctx.offset();
        let start_loc = ctx.location();

        if ctx.check(b'0') {
            match ctx.peek(1) {
                Some(b'x') | Some(b'X') => {
                    return self.scan_radix(
                        ctx,
                        16,
                        LexerErrorCode::MissingHexDigits,
                        start_offset,
                        start_loc,
                    );
                },
                Some(b'b') | Some(b'B') => {
                    return self.scan_radix(
                        ctx,
                        2,
                        LexerErrorCode::MissingBinaryDigits,
                        start_offset,
                        start_loc,
                    );
                },
                Some(b'o') | Some(b'O') => {
                    return self.scan_radix(
                        ctx,
                        8,
                        LexerErrorCode::MissingOctalDigits,
                        start_offset,
                        start_loc,
                    );
                },
                _ => {},
            }
        }

        self.scan_decimal(ctx, start_offset, start_loc)
    }

    fn scan_decimal(
        &self,
        ctx: &mut ScanContext<'_, '_>,
        start_offset: usize,
        start_loc: SourceLocation,
    ) -> Token {
        consume_digits(ctx, 10);

        let mut is_float = false;

        // A dot only belongs to the number if a digit follows; otherwise it
        // is left in place (it may be member access like `123.abs()`).
        if ctx.check(b'.') && ctx.peek(1).is_some_and(|b| b.is_ascii_digit()) {
            ctx.advance();
            is_float = true;
            consume_digits(ctx, 10);
        }

        if matches!(ctx.current(), Some(b'e') | Some(b'E')) {
            ctx.advance();
            is_float = true;

            if matches!(ctx.current(), Some(b'+') | Some(b'-')) {
                ctx.advance();
            }

            if !ctx.current().is_some_and(|b| b.is_ascii_digit()) {
                ctx.report(LexerError::new(
                    LexerErrorCode::MissingExponentDigits,
                    start_loc,
                    "missing digits in float exponent",
                ));
            }
            consume_digits(ctx, 10);
        }

        let is_decimal = ctx.check(b'd');
        consume_suffix(ctx);

        let kind = if is_decimal {
            TokenKind::LitDecimal
        } else if is_float {
            TokenKind::LitFloat
        } else {
            TokenKind::LitInt
        };
        ctx.make_token(kind, start_offset, start_loc)
    }

    fn scan_radix(
        &self,
        ctx: &mut ScanContext<'_, '_>,
        base: u32,
        missing_digits: LexerErrorCode,
        start_offset: usize,
        start_loc: SourceLocation,
    ) -> Token {
        // Consume the "0x"/"0b"/"0o" prefix.
        ctx.advance_by(2);

        let digits_start = ctx.offset();
        consume_digits(ctx, base);

        if ctx.offset() == digits_start {
            let prefix = ctx.text_from(start_offset);
            ctx.report(LexerError::new(
                missing_digits,
                start_loc,
                format!("no digits after `{prefix}` prefix"),
            ));
        }

        consume_suffix(ctx);
        ctx.make_token(TokenKind::LitInt, start_offset, start_loc)
    }
}

/// Consume digits of the given base, allowing `_` separators.
fn consume_digits(ctx: &mut ScanContext<'_, '_>, base: u32) {
    while let Some(b) = ctx.current() {
        if b == b'_' || is_digit_in_base(b, base) {
            ctx.advance();
        } else {
            break;
        }
    }
}

/// Consume an optional type suffix.
///
/// Integer suffixes: `i8`..`i64`, `u8`..`u64`; float: `f32`, `f64`;
/// fixed-point: `d` or `dec64`.
fn consume_suffix(ctx: &mut ScanContext<'_, '_>) {
    match ctx.current() {
        Some(b'u') | Some(b'i') | Some(b'f') => {
            ctx.advance();
            while ctx.current().is_some_and(|b| b.is_ascii_digit()) {
                ctx.advance();
            }
        },
        Some(b'd') => {
            // Either the short `d` or the long `dec64` form.
            if ctx.peek(1) == Some(b'e')
                && ctx.peek(2) == Some(b'c')
                && ctx.peek(3) == Some(b'6')
                && ctx.peek(4) == Some(b'4')
            {
                ctx.advance_by(5);
            } else {
                ctx.advance();
            }
        },
        _ => {},
    }
}
