//! String literal scanning.
//!
//! Three forms, dispatched on the lead character:
//!
//! - normal: `"..."` with escape processing
//! - raw: `r"..."` / `r###"..."###` with a counted hash fence
//! - templated: `t"..."`, verbatim except for `\"`
//!
//! Unterminated strings are reported but still yield a best-effort token
//! covering the consumed input; lexing never aborts on a malformed literal.

use crate::error::{LexerError, LexerErrorCode};
use crate::scanner::ScanContext;
use crate::token::{EscapeFlags, SourceLocation, Token, TokenKind};

/// Scans string literals of all three forms.
pub struct StringScanner;

impl StringScanner {
    /// Check whether the current position starts a string literal
    pub fn can_scan(&self, ctx: &ScanContext<'_, '_>) -> bool {
        match ctx.current() {
            Some(b'"') => true,
            Some(b'r') => matches!(ctx.peek(1), Some(b'"') | Some(b'#')),
            Some(b't') => ctx.peek(1) == Some(b'"'),
            _ => false,
        }
    }

    /// Scan a string literal
    pub fn scan(&self, ctx: &mut ScanContext<'_, '_>) -> Token {
        let start_offset = ctx.offset();
        let start_loc = ctx.location();

        match ctx.current() {
            Some(b'r') => self.scan_raw(ctx, start_offset, start_loc),
            Some(b't') => self.scan_template(ctx, start_offset, start_loc),
            Some(b'"') => self.scan_normal(ctx, start_offset, start_loc),
            _ => ctx.make_unknown(start_offset, start_loc),
        }
    }

    fn scan_normal(
        &self,
        ctx: &mut ScanContext<'_, '_>,
        start_offset: usize,
        start_loc: SourceLocation,
    ) -> Token {
        // Opening quote.
        ctx.advance();
        let value_start = ctx.offset();

        let mut flags = EscapeFlags::empty();
        let value_end;

        loop {
            let Some(b) = ctx.current() else {
                ctx.report(LexerError::new(
                    LexerErrorCode::UnterminatedString,
                    start_loc,
                    "unterminated string literal",
                ));
                value_end = ctx.offset();
                break;
            };

            if b == b'"' {
                value_end = ctx.offset();
                ctx.advance();
                break;
            }

            // Unescaped raw newlines end the literal early.
            if b == b'\n' || b == b'\r' {
                ctx.report(LexerError::new(
                    LexerErrorCode::UnterminatedString,
                    start_loc,
                    "unterminated string literal (missing closing quote before end of line)",
                ));
                value_end = ctx.offset();
                break;
            }

            if b == b'\\' {
                ctx.advance();
                scan_escape(ctx, &mut flags);
                continue;
            }

            ctx.advance();
        }

        let mut token = ctx.make_token(TokenKind::LitString, start_offset, start_loc);
        set_value_span(&mut token, value_start, value_end);
        token.set_escape_flags(flags);
        token
    }

    fn scan_raw(
        &self,
        ctx: &mut ScanContext<'_, '_>,
        start_offset: usize,
        start_loc: SourceLocation,
    ) -> Token {
        // Consume 'r' and count the hash fence.
        ctx.advance();
        let mut hash_count = 0usize;
        while ctx.check(b'#') {
            hash_count += 1;
            ctx.advance();
        }

        if !ctx.match_byte(b'"') {
            return ctx.make_unknown(start_offset, start_loc);
        }
        let value_start = ctx.offset();
        let value_end;

        loop {
            let Some(b) = ctx.current() else {
                ctx.report(LexerError::new(
                    LexerErrorCode::UnterminatedRawString,
                    start_loc,
                    "unterminated raw string literal",
                ));
                value_end = ctx.offset();
                break;
            };

            if b == b'"' {
                let quote_offset = ctx.offset();
                ctx.advance();

                // The closer must match the exact opening hash count; a
                // shorter fence is content, not a terminator.
                let mut end_hashes = 0usize;
                while end_hashes < hash_count && ctx.check(b'#') {
                    end_hashes += 1;
                    ctx.advance();
                }

                if end_hashes == hash_count {
                    value_end = quote_offset;
                    break;
                }
                continue;
            }

            ctx.advance();
        }

        let mut token = ctx.make_token(TokenKind::LitRawString, start_offset, start_loc);
        set_value_span(&mut token, value_start, value_end);
        token
    }

    fn scan_template(
        &self,
        ctx: &mut ScanContext<'_, '_>,
        start_offset: usize,
        start_loc: SourceLocation,
    ) -> Token {
        // Consume 't'.
        ctx.advance();

        if !ctx.match_byte(b'"') {
            return ctx.make_unknown(start_offset, start_loc);
        }
        let value_start = ctx.offset();

        let mut flags = EscapeFlags::empty();
        let value_end;

        loop {
            let Some(b) = ctx.current() else {
                ctx.report(LexerError::new(
                    LexerErrorCode::UnterminatedString,
                    start_loc,
                    "unterminated template string literal",
                ));
                value_end = ctx.offset();
                break;
            };

            if b == b'"' {
                value_end = ctx.offset();
                ctx.advance();
                break;
            }

            // Template content is verbatim except for an escaped quote.
            if b == b'\\' {
                ctx.advance();
                if ctx.check(b'"') {
                    flags |= EscapeFlags::NAMED;
                    ctx.advance();
                }
                continue;
            }

            if b == b'\n' || b == b'\r' {
                flags |= EscapeFlags::LITERAL_CTRL;
            }

            ctx.advance();
        }

        let mut token = ctx.make_token(TokenKind::LitTemplateString, start_offset, start_loc);
        set_value_span(&mut token, value_start, value_end);
        token.set_escape_flags(flags);
        token
    }
}

/// Record and skip one escape sequence after its backslash.
fn scan_escape(ctx: &mut ScanContext<'_, '_>, flags: &mut EscapeFlags) {
    let Some(b) = ctx.current() else {
        return;
    };

    match b {
        b'n' | b'r' | b't' | b'\\' | b'"' | b'\'' | b'0' => {
            *flags |= EscapeFlags::NAMED;
            ctx.advance();
        },
        b'x' => {
            *flags |= EscapeFlags::HEX;
            ctx.advance();
            for _ in 0..2 {
                if ctx.current().is_some_and(|h| h.is_ascii_hexdigit()) {
                    ctx.advance();
                } else {
                    break;
                }
            }
        },
        b'u' => {
            *flags |= EscapeFlags::UNICODE;
            ctx.advance();
            if ctx.match_byte(b'{') {
                loop {
                    match ctx.current() {
                        Some(b'}') => {
                            ctx.advance();
                            break;
                        },
                        Some(h) if h.is_ascii_hexdigit() => ctx.advance(),
                        _ => break,
                    }
                }
            }
        },
        _ => {
            // Unknown escape: skip it and keep scanning.
            ctx.advance();
        },
    }
}

/// Narrow a string token's value span to its content between delimiters.
fn set_value_span(token: &mut Token, value_start: usize, value_end: usize) {
    let length = value_end.saturating_sub(value_start).min(u16::MAX as usize);
    token.set_value_span(value_start as u32, length as u16);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCollector;
    use crate::source_reader::SourceReader;
    use crate::SourceManager;

    fn scan(source: &str) -> (Token, Vec<LexerErrorCode>, String, String) {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer(source, "test.zl");
        let mut reader = SourceReader::new(&sm, buffer);
        let mut errors = ErrorCollector::new();
        let mut ctx = ScanContext::new(&mut reader, &mut errors);
        let token = StringScanner.scan(&mut ctx);
        let codes = errors.errors().iter().map(|e| e.code).collect();
        let value = token.value(&sm).to_string();
        let raw = token.raw_literal(&sm).to_string();
        (token, codes, value, raw)
    }

    #[test]
    fn test_simple_string() {
        let (token, errors, value, raw) = scan("\"hello\"");
        assert_eq!(token.kind(), TokenKind::LitString);
        assert!(errors.is_empty());
        assert_eq!(value, "hello");
        assert_eq!(raw, "\"hello\"");
    }

    #[test]
    fn test_empty_string() {
        let (token, _, value, raw) = scan("\"\"");
        assert_eq!(token.kind(), TokenKind::LitString);
        assert_eq!(value, "");
        assert_eq!(raw, "\"\"");
    }

    #[test]
    fn test_named_escapes_set_flag() {
        let (token, errors, value, _) = scan(r#""a\nb\tc""#);
        assert!(errors.is_empty());
        assert!(token.escape_flags().contains(EscapeFlags::NAMED));
        assert!(!token.escape_flags().contains(EscapeFlags::HEX));
        // The value is the raw payload; escape decoding is a later layer.
        assert_eq!(value, r"a\nb\tc");
    }

    #[test]
    fn test_hex_escape_sets_flag() {
        let (token, _, _, _) = scan(r#""\x41""#);
        assert!(token.escape_flags().contains(EscapeFlags::HEX));
    }

    #[test]
    fn test_unicode_escape_sets_flag() {
        let (token, _, _, _) = scan(r#""\u{1F600}""#);
        assert!(token.escape_flags().contains(EscapeFlags::UNICODE));
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        let (token, errors, value, _) = scan(r#""say \"hi\"""#);
        assert_eq!(token.kind(), TokenKind::LitString);
        assert!(errors.is_empty());
        assert_eq!(value, r#"say \"hi\""#);
    }

    #[test]
    fn test_unterminated_at_eof() {
        let (token, errors, _, raw) = scan("\"never ends");
        assert_eq!(token.kind(), TokenKind::LitString);
        assert_eq!(errors, vec![LexerErrorCode::UnterminatedString]);
        // Best-effort token covers the consumed input.
        assert_eq!(raw, "\"never ends");
    }

    #[test]
    fn test_unterminated_at_newline() {
        let (token, errors, value, _) = scan("\"broken\nrest");
        assert_eq!(token.kind(), TokenKind::LitString);
        assert_eq!(errors, vec![LexerErrorCode::UnterminatedString]);
        assert_eq!(value, "broken");
    }

    #[test]
    fn test_raw_string() {
        let (token, errors, value, raw) = scan(r#"r"no \n escapes""#);
        assert_eq!(token.kind(), TokenKind::LitRawString);
        assert!(errors.is_empty());
        assert_eq!(value, r"no \n escapes");
        assert_eq!(raw, r#"r"no \n escapes""#);
    }

    #[test]
    fn test_raw_string_with_hash_fence() {
        let (token, errors, value, _) = scan(r###"r##"has "quotes" inside"##"###);
        assert_eq!(token.kind(), TokenKind::LitRawString);
        assert!(errors.is_empty());
        assert_eq!(value, r#"has "quotes" inside"#);
    }

    #[test]
    fn test_raw_string_shorter_fence_is_content() {
        // r##"..."# ..."## - the single-hash closer is content.
        let (token, errors, value, _) = scan(r###"r##"a"#b"##"###);
        assert_eq!(token.kind(), TokenKind::LitRawString);
        assert!(errors.is_empty());
        assert_eq!(value, r##"a"#b"##);
    }

    #[test]
    fn test_raw_string_unterminated() {
        let (token, errors, _, _) = scan(r##"r#"never closed""##);
        assert_eq!(token.kind(), TokenKind::LitRawString);
        assert_eq!(errors, vec![LexerErrorCode::UnterminatedRawString]);
    }

    #[test]
    fn test_raw_prefix_without_quote_is_unknown() {
        let (token, _, _, _) = scan("r#x");
        assert_eq!(token.kind(), TokenKind::Unknown);
    }

    #[test]
    fn test_template_string() {
        let (token, errors, value, raw) = scan(r#"t"sum of $x$""#);
        assert_eq!(token.kind(), TokenKind::LitTemplateString);
        assert!(errors.is_empty());
        assert_eq!(value, "sum of $x$");
        assert_eq!(raw, r#"t"sum of $x$""#);
    }

    #[test]
    fn test_template_escaped_quote() {
        let (token, errors, value, _) = scan(r#"t"a \" b""#);
        assert_eq!(token.kind(), TokenKind::LitTemplateString);
        assert!(errors.is_empty());
        assert!(token.escape_flags().contains(EscapeFlags::NAMED));
        assert_eq!(value, r#"a \" b"#);
    }

    #[test]
    fn test_template_preserves_backslashes() {
        let (token, errors, value, _) = scan(r#"t"\frac{1}{2}""#);
        assert_eq!(token.kind(), TokenKind::LitTemplateString);
        assert!(errors.is_empty());
        assert_eq!(value, r"\frac{1}{2}");
    }

    #[test]
    fn test_template_multiline_sets_ctrl_flag() {
        let (token, errors, value, _) = scan("t\"line1\nline2\"");
        assert_eq!(token.kind(), TokenKind::LitTemplateString);
        assert!(errors.is_empty());
        assert!(token.escape_flags().contains(EscapeFlags::LITERAL_CTRL));
        assert_eq!(value, "line1\nline2");
    }

    #[test]
    fn test_template_unterminated() {
        let (token, errors, _, _) = scan("t\"open");
        assert_eq!(token.kind(), TokenKind::LitTemplateString);
        assert_eq!(errors, vec![LexerErrorCode::UnterminatedString]);
    }
}
