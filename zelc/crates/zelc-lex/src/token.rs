//! Token definitions for the Zel lexer.
//!
//! A [`Token`] never owns text: it stores its buffer handle plus byte
//! offsets, and `value`/`raw_literal` resolve through the
//! [`SourceManager`](crate::SourceManager). For string-like kinds the value
//! span excludes the delimiters while the raw span covers the whole literal;
//! for every other kind the two coincide.

use std::sync::LazyLock;

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::source_manager::{BufferId, ExpansionId, SourceManager};

/// The classification of a lexical token.
///
/// Naming convention for [`TokenKind::name`] strings:
/// - Keywords: `KW_` prefix
/// - Literals: `LIT_` prefix
/// - Operators: `OP_` prefix
/// - Delimiters: `DELIM_` prefix
/// - Comments: `COMMENT_` prefix
/// - Special tokens: `TOKEN_` prefix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A name that is not a keyword
    Identifier,

    // Keywords - declarations
    /// `let`
    KwLet,
    /// `var`
    KwVar,
    /// `fn`
    KwFn,
    /// `struct`
    KwStruct,
    /// `enum`
    KwEnum,
    /// `type`
    KwType,
    /// `impl`
    KwImpl,
    /// `trait`
    KwTrait,
    /// `return`
    KwReturn,

    // Keywords - control flow
    /// `if`
    KwIf,
    /// `else`
    KwElse,
    /// `while`
    KwWhile,
    /// `for`
    KwFor,
    /// `in`
    KwIn,
    /// `break`
    KwBreak,
    /// `continue`
    KwContinue,
    /// `match`
    KwMatch,

    // Keywords - modules
    /// `import`
    KwImport,
    /// `as`
    KwAs,

    // Comments
    /// `// ...`
    CommentLine,
    /// `/* ... */`
    CommentBlock,
    /// `/// ...` or `/** ... */`
    CommentDoc,

    // Literals
    /// Integer literal (decimal, hex, binary, or octal)
    LitInt,
    /// Floating-point literal
    LitFloat,
    /// Fixed-point literal (`d` / `dec64` suffix)
    LitDecimal,
    /// `"..."` string
    LitString,
    /// `r"..."` / `r#"..."#` raw string
    LitRawString,
    /// `t"..."` templated string
    LitTemplateString,
    /// `true`
    LitTrue,
    /// `false`
    LitFalse,
    /// `null`
    LitNull,

    // Arithmetic operators
    /// `+`
    OpPlus,
    /// `-`
    OpMinus,
    /// `*`
    OpStar,
    /// `/`
    OpSlash,
    /// `%`
    OpPercent,

    // Comparison operators
    /// `==`
    OpEq,
    /// `!=`
    OpNe,
    /// `<`
    OpLt,
    /// `<=`
    OpLe,
    /// `>`
    OpGt,
    /// `>=`
    OpGe,

    // Logical operators
    /// `&&`
    OpLogicalAnd,
    /// `||`
    OpLogicalOr,
    /// `!`
    OpLogicalNot,

    // Bitwise operators
    /// `&`
    OpBitAnd,
    /// `|`
    OpBitOr,
    /// `^`
    OpBitXor,
    /// `~`
    OpBitNot,
    /// `<<`
    OpShl,
    /// `>>`
    OpShr,

    // Assignment operators
    /// `=`
    OpAssign,
    /// `+=`
    OpPlusAssign,
    /// `-=`
    OpMinusAssign,
    /// `*=`
    OpStarAssign,
    /// `/=`
    OpSlashAssign,
    /// `%=`
    OpPercentAssign,
    /// `&=`
    OpAndAssign,
    /// `|=`
    OpOrAssign,
    /// `^=`
    OpXorAssign,
    /// `<<=`
    OpShlAssign,
    /// `>>=`
    OpShrAssign,

    // Range operators
    /// `..`
    OpDotDot,
    /// `..=`
    OpDotDotEq,

    // Other operators
    /// `->`
    OpArrow,
    /// `=>`
    OpFatArrow,
    /// `.`
    OpDot,
    /// `@`
    OpAt,
    /// `::`
    OpColonColon,

    // Reserved operators
    /// `#`
    OpHash,
    /// `$`
    OpDollar,
    /// `\`
    OpBackslash,

    // Delimiters
    /// `(`
    DelimLParen,
    /// `)`
    DelimRParen,
    /// `{`
    DelimLBrace,
    /// `}`
    DelimRBrace,
    /// `[`
    DelimLBracket,
    /// `]`
    DelimRBracket,
    /// `,`
    DelimComma,
    /// `:`
    DelimColon,
    /// `;`
    DelimSemicolon,
    /// `_` standing alone
    DelimUnderscore,

    // Special tokens
    /// End of file
    Eof,
    /// An unrecognized character
    Unknown,
}

impl TokenKind {
    /// Get the stable name string used by the token output formats
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::KwLet => "KW_LET",
            TokenKind::KwVar => "KW_VAR",
            TokenKind::KwFn => "KW_FN",
            TokenKind::KwStruct => "KW_STRUCT",
            TokenKind::KwEnum => "KW_ENUM",
            TokenKind::KwType => "KW_TYPE",
            TokenKind::KwImpl => "KW_IMPL",
            TokenKind::KwTrait => "KW_TRAIT",
            TokenKind::KwReturn => "KW_RETURN",
            TokenKind::KwIf => "KW_IF",
            TokenKind::KwElse => "KW_ELSE",
            TokenKind::KwWhile => "KW_WHILE",
            TokenKind::KwFor => "KW_FOR",
            TokenKind::KwIn => "KW_IN",
            TokenKind::KwBreak => "KW_BREAK",
            TokenKind::KwContinue => "KW_CONTINUE",
            TokenKind::KwMatch => "KW_MATCH",
            TokenKind::KwImport => "KW_IMPORT",
            TokenKind::KwAs => "KW_AS",
            TokenKind::CommentLine => "COMMENT_LINE",
            TokenKind::CommentBlock => "COMMENT_BLOCK",
            TokenKind::CommentDoc => "COMMENT_DOC",
            TokenKind::LitInt => "LIT_INT",
            TokenKind::LitFloat => "LIT_FLOAT",
            TokenKind::LitDecimal => "LIT_DECIMAL",
            TokenKind::LitString => "LIT_STRING",
            TokenKind::LitRawString => "LIT_RAW_STRING",
            TokenKind::LitTemplateString => "LIT_TEMPLATE_STRING",
            TokenKind::LitTrue => "LIT_TRUE",
            TokenKind::LitFalse => "LIT_FALSE",
            TokenKind::LitNull => "LIT_NULL",
            TokenKind::OpPlus => "OP_PLUS",
            TokenKind::OpMinus => "OP_MINUS",
            TokenKind::OpStar => "OP_STAR",
            TokenKind::OpSlash => "OP_SLASH",
            TokenKind::OpPercent => "OP_PERCENT",
            TokenKind::OpEq => "OP_EQ",
            TokenKind::OpNe => "OP_NE",
            TokenKind::OpLt => "OP_LT",
            TokenKind::OpLe => "OP_LE",
            TokenKind::OpGt => "OP_GT",
            TokenKind::OpGe => "OP_GE",
            TokenKind::OpLogicalAnd => "OP_LOGICAL_AND",
            TokenKind::OpLogicalOr => "OP_LOGICAL_OR",
            TokenKind::OpLogicalNot => "OP_LOGICAL_NOT",
            TokenKind::OpBitAnd => "OP_BIT_AND",
            TokenKind::OpBitOr => "OP_BIT_OR",
            TokenKind::OpBitXor => "OP_BIT_XOR",
            TokenKind::OpBitNot => "OP_BIT_NOT",
            TokenKind::OpShl => "OP_BIT_SHL",
            TokenKind::OpShr => "OP_BIT_SHR",
            TokenKind::OpAssign => "OP_ASSIGN",
            TokenKind::OpPlusAssign => "OP_PLUS_ASSIGN",
            TokenKind::OpMinusAssign => "OP_MINUS_ASSIGN",
            TokenKind::OpStarAssign => "OP_STAR_ASSIGN",
            TokenKind::OpSlashAssign => "OP_SLASH_ASSIGN",
            TokenKind::OpPercentAssign => "OP_PERCENT_ASSIGN",
            TokenKind::OpAndAssign => "OP_AND_ASSIGN",
            TokenKind::OpOrAssign => "OP_OR_ASSIGN",
            TokenKind::OpXorAssign => "OP_XOR_ASSIGN",
            TokenKind::OpShlAssign => "OP_SHL_ASSIGN",
            TokenKind::OpShrAssign => "OP_SHR_ASSIGN",
            TokenKind::OpDotDot => "OP_DOT_DOT",
            TokenKind::OpDotDotEq => "OP_DOT_DOT_EQ",
            TokenKind::OpArrow => "OP_ARROW",
            TokenKind::OpFatArrow => "OP_FAT_ARROW",
            TokenKind::OpDot => "OP_DOT",
            TokenKind::OpAt => "OP_AT",
            TokenKind::OpColonColon => "OP_COLON_COLON",
            TokenKind::OpHash => "OP_HASH",
            TokenKind::OpDollar => "OP_DOLLAR",
            TokenKind::OpBackslash => "OP_BACKSLASH",
            TokenKind::DelimLParen => "DELIM_LPAREN",
            TokenKind::DelimRParen => "DELIM_RPAREN",
            TokenKind::DelimLBrace => "DELIM_LBRACE",
            TokenKind::DelimRBrace => "DELIM_RBRACE",
            TokenKind::DelimLBracket => "DELIM_LBRACKET",
            TokenKind::DelimRBracket => "DELIM_RBRACKET",
            TokenKind::DelimComma => "DELIM_COMMA",
            TokenKind::DelimColon => "DELIM_COLON",
            TokenKind::DelimSemicolon => "DELIM_SEMICOLON",
            TokenKind::DelimUnderscore => "DELIM_UNDERSCORE",
            TokenKind::Eof => "TOKEN_EOF",
            TokenKind::Unknown => "TOKEN_UNKNOWN",
        }
    }

    /// Returns true for the string-like kinds that distinguish a value span
    /// from a raw-literal span
    pub const fn is_string_like(self) -> bool {
        matches!(
            self,
            TokenKind::LitString | TokenKind::LitRawString | TokenKind::LitTemplateString
        )
    }
}

static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    map.insert("let", TokenKind::KwLet);
    map.insert("var", TokenKind::KwVar);
    map.insert("fn", TokenKind::KwFn);
    map.insert("struct", TokenKind::KwStruct);
    map.insert("enum", TokenKind::KwEnum);
    map.insert("type", TokenKind::KwType);
    map.insert("impl", TokenKind::KwImpl);
    map.insert("trait", TokenKind::KwTrait);
    map.insert("return", TokenKind::KwReturn);
    map.insert("if", TokenKind::KwIf);
    map.insert("else", TokenKind::KwElse);
    map.insert("while", TokenKind::KwWhile);
    map.insert("for", TokenKind::KwFor);
    map.insert("in", TokenKind::KwIn);
    map.insert("break", TokenKind::KwBreak);
    map.insert("continue", TokenKind::KwContinue);
    map.insert("match", TokenKind::KwMatch);
    map.insert("import", TokenKind::KwImport);
    map.insert("as", TokenKind::KwAs);
    map.insert("true", TokenKind::LitTrue);
    map.insert("false", TokenKind::LitFalse);
    map.insert("null", TokenKind::LitNull);
    map
});

/// Look up a keyword by its exact (case-sensitive) spelling.
///
/// # Examples
///
/// ```
/// use zelc_lex::{keyword_from_ident, TokenKind};
///
/// assert_eq!(keyword_from_ident("let"), Some(TokenKind::KwLet));
/// assert_eq!(keyword_from_ident("true"), Some(TokenKind::LitTrue));
/// assert_eq!(keyword_from_ident("Let"), None);
/// assert_eq!(keyword_from_ident("letter"), None);
/// ```
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

/// A position within a source buffer.
///
/// Lines and columns are 1-based; the column counts UTF-8 characters. The
/// offset is a 0-based byte offset. Captured from a reader cursor and
/// immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// The buffer this location points into
    pub buffer: BufferId,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based, UTF-8 characters)
    pub column: u32,
    /// Byte offset (0-based)
    pub offset: u32,
}

impl SourceLocation {
    /// Create a location
    pub const fn new(buffer: BufferId, line: u32, column: u32, offset: u32) -> Self {
        Self {
            buffer,
            line,
            column,
            offset,
        }
    }

    /// Returns true if the location points into a real buffer
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.buffer.is_valid()
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self {
            buffer: BufferId::INVALID,
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

/// The classification of a piece of trivia
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriviaKind {
    /// Spaces and tabs
    Whitespace,
    /// A single line break
    Newline,
    /// Any comment form
    Comment,
}

/// Non-semantic source material attached to a token in trivia mode.
///
/// Stores offsets only; use [`Trivia::text`] to resolve the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trivia {
    /// What kind of trivia this is
    pub kind: TriviaKind,
    /// The buffer the trivia lives in
    pub buffer: BufferId,
    /// Byte offset of the trivia
    pub offset: u32,
    /// Byte length of the trivia
    pub length: u16,
}

impl Trivia {
    /// Resolve the trivia's text through the source arena
    pub fn text<'sm>(&self, sm: &'sm SourceManager) -> &'sm str {
        sm.slice(self.buffer, self.offset, self.length)
    }
}

bitflags! {
    /// Which escape categories occurred in a string token.
    ///
    /// Recorded during scanning so later phases can decide whether escape
    /// decoding is needed without re-parsing the text.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EscapeFlags: u8 {
        /// Named escapes: `\n`, `\t`, `\r`, `\0`, `\\`, `\"`, `\'`
        const NAMED = 1 << 0;
        /// Hex escapes: `\xHH`
        const HEX = 1 << 1;
        /// Unicode escapes: `\u{...}`
        const UNICODE = 1 << 2;
        /// Literal embedded control characters (multi-line strings)
        const LITERAL_CTRL = 1 << 3;
    }
}

/// A token's position and extent, bundled for construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSpan {
    /// The buffer the token lives in
    pub buffer: BufferId,
    /// Byte offset of the token
    pub offset: u32,
    /// Byte length of the token
    pub length: u16,
    /// Location of the token's first byte
    pub loc: SourceLocation,
}

impl TokenSpan {
    /// Create a token span
    pub const fn new(buffer: BufferId, offset: u32, length: u16, loc: SourceLocation) -> Self {
        Self {
            buffer,
            offset,
            length,
            loc,
        }
    }
}

/// One classified lexical token.
///
/// Offset-based: the token stores where its text lives, never the text
/// itself. `value()` and `raw_literal()` are views resolved through the
/// [`SourceManager`] and stay valid exactly as long as the arena does.
///
/// # Examples
///
/// ```
/// use zelc_lex::{Lexer, SourceManager, TokenKind};
///
/// let mut sm = SourceManager::new();
/// let buffer = sm.add_buffer("\"hello\"", "main.zl");
/// let mut lexer = Lexer::new(&sm, buffer);
///
/// let token = lexer.next_token();
/// assert_eq!(token.kind(), TokenKind::LitString);
/// assert_eq!(token.value(&sm), "hello");
/// assert_eq!(token.raw_literal(&sm), "\"hello\"");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    buffer: BufferId,
    offset: u32,
    length: u16,
    raw_offset: u32,
    raw_length: u16,
    loc: SourceLocation,
    escape_flags: EscapeFlags,
    expansion_id: Option<ExpansionId>,
    leading_trivia: Vec<Trivia>,
    trailing_trivia: Vec<Trivia>,
}

impl Token {
    /// Create a token; the value span initially coincides with the raw span
    pub fn new(kind: TokenKind, span: TokenSpan) -> Self {
        Self {
            kind,
            buffer: span.buffer,
            offset: span.offset,
            length: span.length,
            raw_offset: span.offset,
            raw_length: span.length,
            loc: span.loc,
            escape_flags: EscapeFlags::empty(),
            expansion_id: None,
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
        }
    }

    /// Create an EOF token (zero length) at the given location
    pub fn make_eof(loc: SourceLocation) -> Self {
        Self::new(
            TokenKind::Eof,
            TokenSpan::new(loc.buffer, loc.offset, 0, loc),
        )
    }

    /// Create an Unknown token
    pub fn make_unknown(span: TokenSpan) -> Self {
        Self::new(TokenKind::Unknown, span)
    }

    /// Get the token kind
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Get the buffer handle
    #[inline]
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    /// Get the byte offset of the value span
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Get the byte length of the value span
    #[inline]
    pub fn length(&self) -> u16 {
        self.length
    }

    /// Get the location of the token's first byte
    #[inline]
    pub fn location(&self) -> &SourceLocation {
        &self.loc
    }

    /// Get the token's semantic value.
    ///
    /// For string-like tokens this is the content between the delimiters;
    /// for everything else it is the raw source text. Valid as long as the
    /// arena is alive.
    pub fn value<'sm>(&self, sm: &'sm SourceManager) -> &'sm str {
        sm.slice(self.buffer, self.offset, self.length)
    }

    /// Get the token's raw source text (delimiters included).
    pub fn raw_literal<'sm>(&self, sm: &'sm SourceManager) -> &'sm str {
        sm.slice(self.buffer, self.raw_offset, self.raw_length)
    }

    /// Narrow the value span; used by string scanners to exclude delimiters
    pub fn set_value_span(&mut self, offset: u32, length: u16) {
        self.offset = offset;
        self.length = length;
    }

    /// Returns true if any trivia is attached
    pub fn has_trivia(&self) -> bool {
        !self.leading_trivia.is_empty() || !self.trailing_trivia.is_empty()
    }

    /// Get the leading trivia
    #[inline]
    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.leading_trivia
    }

    /// Get the trailing trivia
    #[inline]
    pub fn trailing_trivia(&self) -> &[Trivia] {
        &self.trailing_trivia
    }

    /// Replace the leading trivia
    pub fn set_leading_trivia(&mut self, trivia: Vec<Trivia>) {
        self.leading_trivia = trivia;
    }

    /// Replace the trailing trivia
    pub fn set_trailing_trivia(&mut self, trivia: Vec<Trivia>) {
        self.trailing_trivia = trivia;
    }

    /// Get the escape-category flags (string tokens only)
    #[inline]
    pub fn escape_flags(&self) -> EscapeFlags {
        self.escape_flags
    }

    /// Set the escape-category flags
    pub fn set_escape_flags(&mut self, flags: EscapeFlags) {
        self.escape_flags = flags;
    }

    /// Get the macro-expansion handle, if this token came from an expansion.
    ///
    /// Always `None` today; forward-compatibility seam for the macro system.
    #[inline]
    pub fn expansion_id(&self) -> Option<ExpansionId> {
        self.expansion_id
    }

    /// Attach a macro-expansion handle
    pub fn set_expansion_id(&mut self, id: ExpansionId) {
        self.expansion_id = Some(id);
    }

    /// Returns true if this token came from a macro expansion
    pub fn is_from_macro_expansion(&self) -> bool {
        self.expansion_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_at(buffer: BufferId, offset: u32, length: u16) -> TokenSpan {
        TokenSpan::new(
            buffer,
            offset,
            length,
            SourceLocation::new(buffer, 1, offset + 1, offset),
        )
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword_from_ident("let"), Some(TokenKind::KwLet));
        assert_eq!(keyword_from_ident("fn"), Some(TokenKind::KwFn));
        assert_eq!(keyword_from_ident("match"), Some(TokenKind::KwMatch));
        assert_eq!(keyword_from_ident("import"), Some(TokenKind::KwImport));
        assert_eq!(keyword_from_ident("true"), Some(TokenKind::LitTrue));
        assert_eq!(keyword_from_ident("false"), Some(TokenKind::LitFalse));
        assert_eq!(keyword_from_ident("null"), Some(TokenKind::LitNull));
    }

    #[test]
    fn test_keyword_lookup_is_case_sensitive() {
        assert_eq!(keyword_from_ident("Let"), None);
        assert_eq!(keyword_from_ident("LET"), None);
    }

    #[test]
    fn test_keyword_lookup_exact_match_only() {
        assert_eq!(keyword_from_ident("letter"), None);
        assert_eq!(keyword_from_ident("le"), None);
        assert_eq!(keyword_from_ident(""), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::Identifier.name(), "IDENTIFIER");
        assert_eq!(TokenKind::KwLet.name(), "KW_LET");
        assert_eq!(TokenKind::LitInt.name(), "LIT_INT");
        assert_eq!(TokenKind::OpAssign.name(), "OP_ASSIGN");
        assert_eq!(TokenKind::OpDotDotEq.name(), "OP_DOT_DOT_EQ");
        assert_eq!(TokenKind::DelimSemicolon.name(), "DELIM_SEMICOLON");
        assert_eq!(TokenKind::Eof.name(), "TOKEN_EOF");
    }

    #[test]
    fn test_token_value_through_arena() {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer("let x = 42;", "main.zl");

        let token = Token::new(TokenKind::KwLet, span_at(buffer, 0, 3));
        assert_eq!(token.value(&sm), "let");
        assert_eq!(token.raw_literal(&sm), "let");
    }

    #[test]
    fn test_string_value_vs_raw() {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer("\"hello\"", "main.zl");

        let mut token = Token::new(TokenKind::LitString, span_at(buffer, 0, 7));
        token.set_value_span(1, 5);

        assert_eq!(token.value(&sm), "hello");
        assert_eq!(token.raw_literal(&sm), "\"hello\"");
    }

    #[test]
    fn test_eof_token_is_zero_length() {
        let loc = SourceLocation::new(BufferId::from_u32(1), 3, 1, 20);
        let eof = Token::make_eof(loc);
        assert_eq!(eof.kind(), TokenKind::Eof);
        assert_eq!(eof.length(), 0);
        assert_eq!(eof.location().offset, 20);
    }

    #[test]
    fn test_escape_flags() {
        let mut token = Token::new(
            TokenKind::LitString,
            span_at(BufferId::from_u32(1), 0, 2),
        );
        assert!(token.escape_flags().is_empty());

        token.set_escape_flags(EscapeFlags::NAMED | EscapeFlags::HEX);
        assert!(token.escape_flags().contains(EscapeFlags::NAMED));
        assert!(token.escape_flags().contains(EscapeFlags::HEX));
        assert!(!token.escape_flags().contains(EscapeFlags::UNICODE));
    }

    #[test]
    fn test_expansion_id_defaults_to_none() {
        let token = Token::new(TokenKind::Identifier, span_at(BufferId::from_u32(1), 0, 1));
        assert_eq!(token.expansion_id(), None);
        assert!(!token.is_from_macro_expansion());
    }

    #[test]
    fn test_trivia_attachment() {
        let buffer = BufferId::from_u32(1);
        let mut token = Token::new(TokenKind::Identifier, span_at(buffer, 4, 1));
        assert!(!token.has_trivia());

        token.set_leading_trivia(vec![Trivia {
            kind: TriviaKind::Whitespace,
            buffer,
            offset: 0,
            length: 4,
        }]);
        assert!(token.has_trivia());
        assert_eq!(token.leading_trivia().len(), 1);
        assert!(token.trailing_trivia().is_empty());
    }

    #[test]
    fn test_trivia_text() {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer("  // hi\nx", "main.zl");
        let trivia = Trivia {
            kind: TriviaKind::Comment,
            buffer,
            offset: 2,
            length: 5,
        };
        assert_eq!(trivia.text(&sm), "// hi");
    }
}
