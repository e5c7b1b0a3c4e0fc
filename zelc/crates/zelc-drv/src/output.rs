//! Token output formatting.
//!
//! Two formats for tooling consumption:
//!
//! - text: `[line:col] TYPE "escaped-value"` per token, with indented
//!   annotation lines for attached trivia
//! - JSON: `{"success": true, "count": N, "tokens": [{type, value, line,
//!   column, offset, length}, ...]}`

use serde::Serialize;

use zelc_lex::{SourceManager, Token, TokenKind, Trivia, TriviaKind};

/// One token as a JSON record.
#[derive(Serialize)]
struct TokenRecord {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    line: u32,
    column: u32,
    offset: u32,
    length: u16,
}

/// The token list JSON response.
#[derive(Serialize)]
struct TokensResponse {
    success: bool,
    count: usize,
    tokens: Vec<TokenRecord>,
}

/// Escape a token value for display.
///
/// Control characters become `\n`, `\r`, `\t`, or `\xNN`; backslashes and
/// quotes are escaped.
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if (c as u32) < 32 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

fn trivia_kind_name(kind: TriviaKind) -> &'static str {
    match kind {
        TriviaKind::Whitespace => "whitespace",
        TriviaKind::Newline => "newline",
        TriviaKind::Comment => "comment",
    }
}

fn push_trivia_lines(out: &mut String, label: &str, trivia: &[Trivia]) {
    for t in trivia {
        out.push_str(&format!("  ({} trivia: {})\n", label, trivia_kind_name(t.kind)));
    }
}

/// Format tokens as human-readable text.
///
/// # Examples
///
/// ```
/// use zelc_drv::format_tokens_text;
/// use zelc_lex::{Lexer, SourceManager};
///
/// let mut sm = SourceManager::new();
/// let buffer = sm.add_buffer("let x = 1;", "main.zl");
/// let tokens = Lexer::new(&sm, buffer).tokenize();
///
/// let text = format_tokens_text(&tokens, &sm);
/// assert!(text.contains("[1:1] KW_LET \"let\""));
/// ```
pub fn format_tokens_text(tokens: &[Token], sm: &SourceManager) -> String {
    let mut out = String::new();

    out.push_str("=== Lexical Analysis Result ===\n");
    out.push_str(&format!("Total tokens: {}\n\n", tokens.len()));

    for token in tokens {
        let loc = token.location();
        out.push_str(&format!("[{}:{}] ", loc.line, loc.column));
        out.push_str(token.kind().name());

        let value = token.value(sm);
        if !value.is_empty() && token.kind() != TokenKind::Eof {
            out.push_str(&format!(" \"{}\"", escape_value(value)));
        }
        out.push('\n');

        if token.has_trivia() {
            push_trivia_lines(&mut out, "leading", token.leading_trivia());
            push_trivia_lines(&mut out, "trailing", token.trailing_trivia());
        }
    }

    out
}

/// Format tokens as a JSON document.
///
/// # Examples
///
/// ```
/// use zelc_drv::format_tokens_json;
/// use zelc_lex::{Lexer, SourceManager};
///
/// let mut sm = SourceManager::new();
/// let buffer = sm.add_buffer("x", "main.zl");
/// let tokens = Lexer::new(&sm, buffer).tokenize();
///
/// let doc: serde_json::Value =
///     serde_json::from_str(&format_tokens_json(&tokens, &sm)).unwrap();
/// assert_eq!(doc["tokens"][0]["type"], "IDENTIFIER");
/// ```
pub fn format_tokens_json(tokens: &[Token], sm: &SourceManager) -> String {
    let response = TokensResponse {
        success: true,
        count: tokens.len(),
        tokens: tokens
            .iter()
            .map(|token| {
                let loc = token.location();
                TokenRecord {
                    kind: token.kind().name().to_string(),
                    value: token.value(sm).to_string(),
                    line: loc.line,
                    column: loc.column,
                    offset: loc.offset,
                    length: token.length(),
                }
            })
            .collect(),
    };

    serde_json::to_string_pretty(&response)
        .unwrap_or_else(|_| r#"{"success": false, "error": "JSON serialization failed"}"#.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zelc_lex::Lexer;

    fn lex(source: &str) -> (SourceManager, Vec<Token>) {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer(source, "test.zl");
        let tokens = Lexer::new(&sm, buffer).tokenize();
        (sm, tokens)
    }

    #[test]
    fn test_text_format() {
        let (sm, tokens) = lex("let x = 42;");
        let text = format_tokens_text(&tokens, &sm);

        assert!(text.contains("Total tokens: 6"));
        assert!(text.contains("[1:1] KW_LET \"let\""));
        assert!(text.contains("[1:5] IDENTIFIER \"x\""));
        assert!(text.contains("[1:9] LIT_INT \"42\""));
        assert!(text.contains("[1:11] DELIM_SEMICOLON \";\""));
        assert!(text.contains("TOKEN_EOF"));
    }

    #[test]
    fn test_text_format_escapes_control_characters() {
        let (sm, tokens) = lex("\"a\\tb\"");
        let text = format_tokens_text(&tokens, &sm);
        // The raw backslash in the source is escaped for display.
        assert!(text.contains("LIT_STRING \"a\\\\tb\""));
    }

    #[test]
    fn test_text_format_eof_has_no_value() {
        let (sm, tokens) = lex("");
        let text = format_tokens_text(&tokens, &sm);
        assert!(text.contains("[1:1] TOKEN_EOF\n"));
    }

    #[test]
    fn test_text_format_trivia_annotations() {
        let mut sm = SourceManager::new();
        let buffer = sm.add_buffer("x // note", "test.zl");
        let tokens = Lexer::new(&sm, buffer).tokenize_with_trivia();
        let text = format_tokens_text(&tokens, &sm);

        assert!(text.contains("(trailing trivia: whitespace)"));
        assert!(text.contains("(trailing trivia: comment)"));
    }

    #[test]
    fn test_json_format() {
        let (sm, tokens) = lex("let x = 1;");
        let doc: serde_json::Value = serde_json::from_str(&format_tokens_json(&tokens, &sm)).unwrap();

        assert_eq!(doc["success"], true);
        assert_eq!(doc["count"], 6);
        assert_eq!(doc["tokens"][0]["type"], "KW_LET");
        assert_eq!(doc["tokens"][0]["value"], "let");
        assert_eq!(doc["tokens"][0]["line"], 1);
        assert_eq!(doc["tokens"][0]["column"], 1);
        assert_eq!(doc["tokens"][0]["offset"], 0);
        assert_eq!(doc["tokens"][0]["length"], 3);
    }

    #[test]
    fn test_json_format_string_value_excludes_quotes() {
        let (sm, tokens) = lex("\"hi\"");
        let doc: serde_json::Value = serde_json::from_str(&format_tokens_json(&tokens, &sm)).unwrap();
        assert_eq!(doc["tokens"][0]["type"], "LIT_STRING");
        assert_eq!(doc["tokens"][0]["value"], "hi");
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value("plain"), "plain");
        assert_eq!(escape_value("a\nb"), "a\\nb");
        assert_eq!(escape_value("a\tb"), "a\\tb");
        assert_eq!(escape_value("q\"q"), "q\\\"q");
        assert_eq!(escape_value("b\\b"), "b\\\\b");
        assert_eq!(escape_value("\u{1}"), "\\x01");
    }
}
