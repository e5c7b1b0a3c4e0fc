//! Operator and delimiter scanning.
//!
//! Table-driven with greedy longest match: a 3-character candidate is tried
//! first, then 2, then 1, so `..=` always wins over `..` and `..` over `.`.

use crate::scanner::ScanContext;
use crate::token::{Token, TokenKind};

/// Three-character operators.
const TRIPLE_CHAR_TOKENS: &[(&[u8; 3], TokenKind)] = &[
    (b"<<=", TokenKind::OpShlAssign),
    (b">>=", TokenKind::OpShrAssign),
    (b"..=", TokenKind::OpDotDotEq),
];

/// Two-character operators.
const DOUBLE_CHAR_TOKENS: &[(&[u8; 2], TokenKind)] = &[
    (b"==", TokenKind::OpEq),
    (b"!=", TokenKind::OpNe),
    (b"<=", TokenKind::OpLe),
    (b">=", TokenKind::OpGe),
    (b"&&", TokenKind::OpLogicalAnd),
    (b"||", TokenKind::OpLogicalOr),
    (b"+=", TokenKind::OpPlusAssign),
    (b"-=", TokenKind::OpMinusAssign),
    (b"*=", TokenKind::OpStarAssign),
    (b"/=", TokenKind::OpSlashAssign),
    (b"%=", TokenKind::OpPercentAssign),
    (b"&=", TokenKind::OpAndAssign),
    (b"|=", TokenKind::OpOrAssign),
    (b"^=", TokenKind::OpXorAssign),
    (b"<<", TokenKind::OpShl),
    (b">>", TokenKind::OpShr),
    (b"->", TokenKind::OpArrow),
    (b"=>", TokenKind::OpFatArrow),
    (b"..", TokenKind::OpDotDot),
    (b"::", TokenKind::OpColonColon),
];

/// Single-character tokens with no longer form.
const SINGLE_CHAR_TOKENS: &[(u8, TokenKind)] = &[
    (b'(', TokenKind::DelimLParen),
    (b')', TokenKind::DelimRParen),
    (b'{', TokenKind::DelimLBrace),
    (b'}', TokenKind::DelimRBrace),
    (b'[', TokenKind::DelimLBracket),
    (b']', TokenKind::DelimRBracket),
    (b',', TokenKind::DelimComma),
    (b';', TokenKind::DelimSemicolon),
    (b'@', TokenKind::OpAt),
    (b'#', TokenKind::OpHash),
    (b'$', TokenKind::OpDollar),
    (b'\\', TokenKind::OpBackslash),
];

/// Characters that may start a multi-character operator, with their
/// single-character fallback kind.
const MULTI_START_TOKENS: &[(u8, TokenKind)] = &[
    (b'+', TokenKind::OpPlus),
    (b'-', TokenKind::OpMinus),
    (b'*', TokenKind::OpStar),
    (b'/', TokenKind::OpSlash),
    (b'%', TokenKind::OpPercent),
    (b'&', TokenKind::OpBitAnd),
    (b'|', TokenKind::OpBitOr),
    (b'^', TokenKind::OpBitXor),
    (b'~', TokenKind::OpBitNot),
    (b'<', TokenKind::OpLt),
    (b'>', TokenKind::OpGt),
    (b'=', TokenKind::OpAssign),
    (b'!', TokenKind::OpLogicalNot),
    (b'.', TokenKind::OpDot),
    (b':', TokenKind::DelimColon),
];

fn lookup_single(b: u8) -> Option<TokenKind> {
    SINGLE_CHAR_TOKENS
        .iter()
        .find(|(c, _)| *c == b)
        .map(|(_, kind)| *kind)
}

fn lookup_multi_start(b: u8) -> Option<TokenKind> {
    MULTI_START_TOKENS
        .iter()
        .find(|(c, _)| *c == b)
        .map(|(_, kind)| *kind)
}

/// Scans operators and delimiters with greedy longest match.
pub struct OperatorScanner;

impl OperatorScanner {
    /// Check whether the current byte starts an operator or delimiter
    pub fn can_scan(&self, ctx: &ScanContext<'_, '_>) -> bool {
        match ctx.current() {
            Some(b) => lookup_single(b).is_some() || lookup_multi_start(b).is_some(),
            None => false,
        }
    }

    /// Scan one operator or delimiter
    pub fn scan(&self, ctx: &mut ScanContext<'_, '_>) -> Token {
        let start_offset = ctx.offset();
        let start_loc = ctx.location();

        let Some(first) = ctx.current() else {
            return ctx.make_unknown(start_offset, start_loc);
        };

        // Longest match first: 3 characters, then 2, then 1.
        if let (Some(second), Some(third)) = (ctx.peek(1), ctx.peek(2)) {
            let candidate = [first, second, third];
            if let Some((_, kind)) = TRIPLE_CHAR_TOKENS.iter().find(|(op, _)| **op == candidate) {
                ctx.advance_by(3);
                return ctx.make_token(*kind, start_offset, start_loc);
            }
        }

        if let Some(second) = ctx.peek(1) {
            let candidate = [first, second];
            if let Some((_, kind)) = DOUBLE_CHAR_TOKENS.iter().find(|(op, _)| **op == candidate) {
                ctx.advance_by(2);
                return ctx.make_token(*kind, start_offset, start_loc);
            }
        }

        if let Some(kind) = lookup_single(first) {
            ctx.advance();
            return ctx.make_token(kind, start_offset, start_loc);
        }

        if let Some(kind) = lookup_multi_start(first) {
            ctx.advance();
            return ctx.make_token(kind, start_offset, start_loc);
        }

        ctx.advance();
        ctx.make_unknown(start_offset, start_loc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCollector;
    use crate::source_reader::SourceReader;
    use crate::SourceManager;

    fn scan(source: &str) -> (TokenKind, usize) {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer(source, "test.zl");
        let mut reader = SourceReader::new(&sm, buffer);
        let mut errors = ErrorCollector::new();
        let mut ctx = ScanContext::new(&mut reader, &mut errors);
        let token = OperatorScanner.scan(&mut ctx);
        (token.kind(), ctx.offset())
    }

    #[test]
    fn test_single_char_operators() {
        assert_eq!(scan("+"), (TokenKind::OpPlus, 1));
        assert_eq!(scan("-"), (TokenKind::OpMinus, 1));
        assert_eq!(scan("."), (TokenKind::OpDot, 1));
        assert_eq!(scan("="), (TokenKind::OpAssign, 1));
        assert_eq!(scan("<"), (TokenKind::OpLt, 1));
        assert_eq!(scan("~"), (TokenKind::OpBitNot, 1));
        assert_eq!(scan(":"), (TokenKind::DelimColon, 1));
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(scan("("), (TokenKind::DelimLParen, 1));
        assert_eq!(scan(")"), (TokenKind::DelimRParen, 1));
        assert_eq!(scan("{"), (TokenKind::DelimLBrace, 1));
        assert_eq!(scan("}"), (TokenKind::DelimRBrace, 1));
        assert_eq!(scan("["), (TokenKind::DelimLBracket, 1));
        assert_eq!(scan("]"), (TokenKind::DelimRBracket, 1));
        assert_eq!(scan(","), (TokenKind::DelimComma, 1));
        assert_eq!(scan(";"), (TokenKind::DelimSemicolon, 1));
    }

    #[test]
    fn test_reserved_operators() {
        assert_eq!(scan("@"), (TokenKind::OpAt, 1));
        assert_eq!(scan("#"), (TokenKind::OpHash, 1));
        assert_eq!(scan("$"), (TokenKind::OpDollar, 1));
        assert_eq!(scan("\\"), (TokenKind::OpBackslash, 1));
    }

    #[test]
    fn test_double_char_operators() {
        assert_eq!(scan("=="), (TokenKind::OpEq, 2));
        assert_eq!(scan("!="), (TokenKind::OpNe, 2));
        assert_eq!(scan("<="), (TokenKind::OpLe, 2));
        assert_eq!(scan(">="), (TokenKind::OpGe, 2));
        assert_eq!(scan("&&"), (TokenKind::OpLogicalAnd, 2));
        assert_eq!(scan("||"), (TokenKind::OpLogicalOr, 2));
        assert_eq!(scan("->"), (TokenKind::OpArrow, 2));
        assert_eq!(scan("=>"), (TokenKind::OpFatArrow, 2));
        assert_eq!(scan("::"), (TokenKind::OpColonColon, 2));
        assert_eq!(scan(".."), (TokenKind::OpDotDot, 2));
    }

    #[test]
    fn test_triple_char_operators() {
        assert_eq!(scan("<<="), (TokenKind::OpShlAssign, 3));
        assert_eq!(scan(">>="), (TokenKind::OpShrAssign, 3));
        assert_eq!(scan("..="), (TokenKind::OpDotDotEq, 3));
    }

    #[test]
    fn test_longest_match_wins() {
        // "..=" must never split into ".." + "=".
        assert_eq!(scan("..=5"), (TokenKind::OpDotDotEq, 3));
        // "<<=" must never split into "<<" + "=" or "<" + "<=".
        assert_eq!(scan("<<=1"), (TokenKind::OpShlAssign, 3));
        // "<<" beats "<".
        assert_eq!(scan("<<1"), (TokenKind::OpShl, 2));
        // ".." beats ".".
        assert_eq!(scan("..5"), (TokenKind::OpDotDot, 2));
    }

    #[test]
    fn test_longest_match_all_triples_and_doubles() {
        for (op, kind) in TRIPLE_CHAR_TOKENS {
            let text = std::str::from_utf8(*op).unwrap();
            assert_eq!(scan(text), (*kind, 3), "operator {text}");
        }
        for (op, kind) in DOUBLE_CHAR_TOKENS {
            let text = std::str::from_utf8(*op).unwrap();
            assert_eq!(scan(text), (*kind, 2), "operator {text}");
        }
    }

    #[test]
    fn test_assignment_operators() {
        assert_eq!(scan("+="), (TokenKind::OpPlusAssign, 2));
        assert_eq!(scan("-="), (TokenKind::OpMinusAssign, 2));
        assert_eq!(scan("*="), (TokenKind::OpStarAssign, 2));
        assert_eq!(scan("/="), (TokenKind::OpSlashAssign, 2));
        assert_eq!(scan("%="), (TokenKind::OpPercentAssign, 2));
        assert_eq!(scan("&="), (TokenKind::OpAndAssign, 2));
        assert_eq!(scan("|="), (TokenKind::OpOrAssign, 2));
        assert_eq!(scan("^="), (TokenKind::OpXorAssign, 2));
    }

    #[test]
    fn test_can_scan() {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer("+a", "test.zl");
        let mut reader = SourceReader::new(&sm, buffer);
        let mut errors = ErrorCollector::new();

        let ctx = ScanContext::new(&mut reader, &mut errors);
        assert!(OperatorScanner.can_scan(&ctx));
        drop(ctx);

        reader.advance();
        let ctx = ScanContext::new(&mut reader, &mut errors);
        assert!(!OperatorScanner.can_scan(&ctx));
    }
}
