//! Identifier and keyword scanning.

use crate::scanner::ScanContext;
use crate::token::{keyword_from_ident, Token, TokenKind};
use crate::utf8;

/// Scans identifiers and keywords.
///
/// Starts on an ASCII letter, an underscore, or a UTF-8 multi-byte lead
/// byte. Multi-byte sequences are validated while scanning; a malformed
/// sequence ends the identifier silently rather than erroring, keeping the
/// scan resilient.
pub struct IdentScanner;

impl IdentScanner {
    /// Check whether the current byte can start an identifier
    pub fn can_scan(&self, ctx: &ScanContext<'_, '_>) -> bool {
        match ctx.current() {
            Some(b) => utf8::is_ascii_ident_start(b) || utf8::is_utf8_lead_byte(b),
            None => false,
        }
    }

    /// Scan an identifier or keyword
    pub fn scan(&self, ctx: &mut ScanContext<'_, '_>) -> Token {
        let start_offset = ctx.offset();
        let start_loc = ctx.location();

        let Some(first) = ctx.current() else {
            return ctx.make_unknown(start_offset, start_loc);
        };

        if utf8::is_utf8_lead_byte(first) {
            if !consume_utf8_char(ctx) {
                // Malformed sequence at the very start: consume one byte
                // and classify as unknown.
                ctx.advance();
                return ctx.make_unknown(start_offset, start_loc);
            }
        } else {
            ctx.advance();
        }

        loop {
            let Some(b) = ctx.current() else {
                break;
            };

            if utf8::is_ascii_ident_continue(b) {
                ctx.advance();
            } else if utf8::is_utf8_lead_byte(b) {
                if !consume_utf8_char(ctx) {
                    // Malformed sequence ends the identifier silently.
                    break;
                }
            } else {
                break;
            }
        }

        let text = ctx.text_from(start_offset);

        // A bare underscore is the wildcard delimiter, not an identifier.
        if text == "_" {
            return ctx.make_token(TokenKind::DelimUnderscore, start_offset, start_loc);
        }

        let kind = keyword_from_ident(text).unwrap_or(TokenKind::Identifier);
        ctx.make_token(kind, start_offset, start_loc)
    }
}

/// Consume one validated multi-byte UTF-8 sequence.
///
/// Returns false without consuming anything if the sequence is malformed
/// (wrong length or bad continuation bytes).
fn consume_utf8_char(ctx: &mut ScanContext<'_, '_>) -> bool {
    let Some(first) = ctx.current() else {
        return false;
    };

    let len = utf8::sequence_length(first);
    if len == 0 {
        return false;
    }

    for i in 1..len {
        match ctx.peek(i) {
            Some(b) if utf8::is_continuation_byte(b) => {},
            _ => return false,
        }
    }

    ctx.advance_by(len);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCollector;
    use crate::source_reader::SourceReader;
    use crate::SourceManager;

    fn scan(source: &str) -> (Token, bool) {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer(source, "test.zl");
        let mut reader = SourceReader::new(&sm, buffer);
        let mut errors = ErrorCollector::new();
        let mut ctx = ScanContext::new(&mut reader, &mut errors);
        let token = IdentScanner.scan(&mut ctx);
        (token, errors.has_errors())
    }

    fn scan_bytes(source: &[u8]) -> (Token, bool, usize) {
        // Buffers hold strings; smuggle invalid bytes in via unchecked
        // construction for malformed-UTF-8 tests.
        let text = unsafe { String::from_utf8_unchecked(source.to_vec()) };
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer(text, "test.zl");
        let mut reader = SourceReader::new(&sm, buffer);
        let mut errors = ErrorCollector::new();
        let mut ctx = ScanContext::new(&mut reader, &mut errors);
        let token = IdentScanner.scan(&mut ctx);
        let consumed = ctx.offset();
        (token, errors.has_errors(), consumed)
    }

    #[test]
    fn test_simple_identifier() {
        let (token, _) = scan("foo");
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!(token.length(), 3);
    }

    #[test]
    fn test_identifier_with_digits_and_underscores() {
        let (token, _) = scan("foo_bar_123");
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!(token.length(), 11);
    }

    #[test]
    fn test_keyword() {
        assert_eq!(scan("let").0.kind(), TokenKind::KwLet);
        assert_eq!(scan("match").0.kind(), TokenKind::KwMatch);
        assert_eq!(scan("import").0.kind(), TokenKind::KwImport);
        assert_eq!(scan("true").0.kind(), TokenKind::LitTrue);
        assert_eq!(scan("null").0.kind(), TokenKind::LitNull);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(scan("letter").0.kind(), TokenKind::Identifier);
        assert_eq!(scan("iff").0.kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_bare_underscore_is_delimiter() {
        let (token, _) = scan("_");
        assert_eq!(token.kind(), TokenKind::DelimUnderscore);
    }

    #[test]
    fn test_underscore_prefixed_identifier() {
        let (token, _) = scan("_private");
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!(token.length(), 8);
    }

    #[test]
    fn test_utf8_identifier() {
        let (token, had_errors) = scan("变量名");
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!(token.length() as usize, "变量名".len());
        assert!(!had_errors);
    }

    #[test]
    fn test_mixed_ascii_utf8_identifier() {
        let (token, _) = scan("αβ_x1");
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!(token.length() as usize, "αβ_x1".len());
    }

    #[test]
    fn test_malformed_utf8_inside_identifier_terminates_silently() {
        // 'a', 'b', then a 2-byte lead with no continuation byte.
        let (token, had_errors, consumed) = scan_bytes(&[b'a', b'b', 0xC3, b'c']);
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!(token.length(), 2);
        // Silent termination: no error, bad byte left for the next scan.
        assert!(!had_errors);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_malformed_utf8_at_start_is_unknown() {
        let (token, had_errors, consumed) = scan_bytes(&[0xC3, b' ']);
        assert_eq!(token.kind(), TokenKind::Unknown);
        assert!(!had_errors);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_can_scan() {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer("a1+", "test.zl");
        let mut reader = SourceReader::new(&sm, buffer);
        let mut errors = ErrorCollector::new();

        let ctx = ScanContext::new(&mut reader, &mut errors);
        assert!(IdentScanner.can_scan(&ctx));
        drop(ctx);

        reader.advance_by(2);
        let ctx = ScanContext::new(&mut reader, &mut errors);
        assert!(!IdentScanner.can_scan(&ctx));
    }
}
