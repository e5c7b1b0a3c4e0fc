//! Lightweight Markdown subset rendering.
//!
//! Diagnostic messages may use a small Markdown subset: `**bold**`,
//! `*italic*`, `` `inline code` ``, `[links](url)`, line breaks, and
//! fenced code blocks. [`render_markdown`] converts it to ANSI escapes for
//! terminal output; [`strip_markdown`] reduces it to plain text for
//! machine-readable output.
//!
//! Unmatched markers are treated as literal text; the renderer never fails.

use super::text::AnsiStyle;

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const LINK: &str = "\x1b[34;4m";
const RESET: &str = "\x1b[0m";

/// Render a fenced code block with a 4-space indent per line.
fn push_code_block(out: &mut String, code: &str, style: &AnsiStyle) {
    if style.enabled {
        out.push_str(style.code_color.code());
    }
    for line in code.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    if style.enabled {
        out.push_str(RESET);
    }
}

/// Render a Markdown-subset message to ANSI text.
///
/// With a disabled style the formatting markers are stripped, except that
/// inline code keeps its backticks so it stays visually distinct.
///
/// # Examples
///
/// ```
/// use zelc_diag::{render_markdown, AnsiStyle};
///
/// let plain = render_markdown("expected `;` after **statement**", &AnsiStyle::plain());
/// assert_eq!(plain, "expected `;` after statement");
/// ```
pub fn render_markdown(message: &str, style: &AnsiStyle) -> String {
    let mut out = String::with_capacity(message.len() + 16);
    let mut rest = message;

    while !rest.is_empty() {
        // Fenced code block
        if let Some(stripped) = rest.strip_prefix("```") {
            // Skip an optional info string up to the first newline.
            let body = match stripped.find('\n') {
                Some(nl) => &stripped[nl + 1..],
                None => stripped,
            };
            if let Some(close) = body.find("```") {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                push_code_block(&mut out, &body[..close], style);
                rest = &body[close + 3..];
                continue;
            }
            // No closing fence: literal.
            out.push_str("```");
            rest = stripped;
            continue;
        }

        // Bold
        if let Some(stripped) = rest.strip_prefix("**") {
            if let Some(close) = stripped.find("**") {
                if style.enabled {
                    out.push_str(BOLD);
                }
                out.push_str(&stripped[..close]);
                if style.enabled {
                    out.push_str(RESET);
                }
                rest = &stripped[close + 2..];
                continue;
            }
            out.push_str("**");
            rest = stripped;
            continue;
        }

        // Italic
        if let Some(stripped) = rest.strip_prefix('*') {
            if let Some(close) = stripped.find('*') {
                if style.enabled {
                    out.push_str(ITALIC);
                }
                out.push_str(&stripped[..close]);
                if style.enabled {
                    out.push_str(RESET);
                }
                rest = &stripped[close + 1..];
                continue;
            }
            out.push('*');
            rest = stripped;
            continue;
        }

        // Inline code
        if let Some(stripped) = rest.strip_prefix('`') {
            if let Some(close) = stripped.find('`') {
                if style.enabled {
                    out.push_str(style.code_color.code());
                    out.push_str(&stripped[..close]);
                    out.push_str(RESET);
                } else {
                    out.push('`');
                    out.push_str(&stripped[..close]);
                    out.push('`');
                }
                rest = &stripped[close + 1..];
                continue;
            }
            out.push('`');
            rest = stripped;
            continue;
        }

        // Link: [text](url)
        if let Some(stripped) = rest.strip_prefix('[') {
            if let Some(text_end) = stripped.find(']') {
                let after_text = &stripped[text_end + 1..];
                if let Some(url_rest) = after_text.strip_prefix('(') {
                    if let Some(url_end) = url_rest.find(')') {
                        if style.enabled {
                            out.push_str(LINK);
                            out.push_str(&stripped[..text_end]);
                            out.push_str(RESET);
                        } else {
                            out.push_str(&stripped[..text_end]);
                        }
                        rest = &url_rest[url_end + 1..];
                        continue;
                    }
                }
            }
            out.push('[');
            rest = stripped;
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// Strip Markdown-subset formatting to plain text.
///
/// Bold/italic markers, backticks, and link URLs are removed; fenced code
/// keeps its content without the fences.
///
/// # Examples
///
/// ```
/// use zelc_diag::strip_markdown;
///
/// assert_eq!(strip_markdown("see [the docs](https://example.com)"), "see the docs");
/// assert_eq!(strip_markdown("expected `;`"), "expected ;");
/// ```
pub fn strip_markdown(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;

    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix("```") {
            let body = match stripped.find('\n') {
                Some(nl) => &stripped[nl + 1..],
                None => stripped,
            };
            if let Some(close) = body.find("```") {
                out.push_str(&body[..close]);
                rest = &body[close + 3..];
                continue;
            }
            out.push_str("```");
            rest = stripped;
            continue;
        }
        if let Some(stripped) = rest.strip_prefix("**") {
            if let Some(close) = stripped.find("**") {
                out.push_str(&stripped[..close]);
                rest = &stripped[close + 2..];
                continue;
            }
            out.push_str("**");
            rest = stripped;
            continue;
        }
        if let Some(stripped) = rest.strip_prefix('*') {
            if let Some(close) = stripped.find('*') {
                out.push_str(&stripped[..close]);
                rest = &stripped[close + 1..];
                continue;
            }
            out.push('*');
            rest = stripped;
            continue;
        }
        if let Some(stripped) = rest.strip_prefix('`') {
            if let Some(close) = stripped.find('`') {
                out.push_str(&stripped[..close]);
                rest = &stripped[close + 1..];
                continue;
            }
            out.push('`');
            rest = stripped;
            continue;
        }
        if let Some(stripped) = rest.strip_prefix('[') {
            if let Some(text_end) = stripped.find(']') {
                let after_text = &stripped[text_end + 1..];
                if let Some(url_rest) = after_text.strip_prefix('(') {
                    if let Some(url_end) = url_rest.find(')') {
                        out.push_str(&stripped[..text_end]);
                        rest = &url_rest[url_end + 1..];
                        continue;
                    }
                }
            }
            out.push('[');
            rest = stripped;
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_style_strips_bold() {
        let out = render_markdown("a **bold** word", &AnsiStyle::plain());
        assert_eq!(out, "a bold word");
    }

    #[test]
    fn test_plain_style_keeps_code_ticks() {
        let out = render_markdown("expected `;`", &AnsiStyle::plain());
        assert_eq!(out, "expected `;`");
    }

    #[test]
    fn test_colored_bold() {
        let out = render_markdown("a **bold** word", &AnsiStyle::default());
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("bold"));
        assert!(out.contains("\x1b[0m"));
    }

    #[test]
    fn test_colored_inline_code() {
        let out = render_markdown("expected `;`", &AnsiStyle::default());
        assert!(!out.contains('`'));
        assert!(out.contains(';'));
        assert!(out.contains("\x1b["));
    }

    #[test]
    fn test_italic() {
        let out = render_markdown("an *italic* word", &AnsiStyle::default());
        assert!(out.contains("\x1b[3m"));
        let plain = render_markdown("an *italic* word", &AnsiStyle::plain());
        assert_eq!(plain, "an italic word");
    }

    #[test]
    fn test_link() {
        let out = render_markdown("see [docs](https://example.com)", &AnsiStyle::plain());
        assert_eq!(out, "see docs");

        let colored = render_markdown("see [docs](https://example.com)", &AnsiStyle::default());
        assert!(colored.contains("\x1b[34;4m"));
        assert!(!colored.contains("https://example.com"));
    }

    #[test]
    fn test_unmatched_markers_are_literal() {
        assert_eq!(render_markdown("2 * 3", &AnsiStyle::plain()), "2 * 3");
        assert_eq!(render_markdown("a ` b", &AnsiStyle::plain()), "a ` b");
        assert_eq!(render_markdown("a [ b", &AnsiStyle::plain()), "a [ b");
    }

    #[test]
    fn test_fenced_code_block() {
        let out = render_markdown("try:\n```\nlet x = 1;\n```", &AnsiStyle::plain());
        assert!(out.contains("    let x = 1;"));
    }

    #[test]
    fn test_strip_markdown() {
        assert_eq!(strip_markdown("a **bold** `code` *i*"), "a bold code i");
        assert_eq!(strip_markdown("see [docs](url)"), "see docs");
        assert_eq!(strip_markdown("plain text"), "plain text");
    }
}
