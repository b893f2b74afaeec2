//! Plain-text renderings of token streams
//!
//!     These are used by the CLI's `token-simple` format and by snapshot tests. They are meant
//!     for people reading token streams, not for machines; use serde for the latter.

use super::core::Token;
use std::fmt::Write;
use std::ops::Range;

/// Render one token per line: `<start>..<end> <KIND>` followed by the source text for content
/// tokens.
pub fn format_simple(tokens: &[(Token, Range<usize>)], source: &str) -> String {
    let mut out = String::new();
    for (token, range) in tokens {
        let _ = write!(out, "{}..{} {}", range.start, range.end, token);
        if let Token::Content(_) = token {
            let text = source.get(range.clone()).unwrap_or("");
            let _ = write!(out, " {:?}", text);
        }
        out.push('\n');
    }
    out
}

/// Render only the scanner-produced tokens, separated by spaces.
///
/// This is the shape a grammar sees once content is stripped away, and the most compact way
/// to compare nesting structure.
pub fn format_structure(tokens: &[(Token, Range<usize>)]) -> String {
    tokens
        .iter()
        .filter_map(|(token, _)| token.kind())
        .map(|kind| kind.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewtree::token::{ContentToken, TokenKind};

    #[test]
    fn test_format_simple() {
        let tokens = vec![
            (Token::Content(ContentToken::Identifier), 0..1),
            (Token::Scanned(TokenKind::LineBreak), 1..2),
            (Token::Scanned(TokenKind::IndentOpen), 3..3),
        ];
        assert_eq!(
            format_simple(&tokens, "a\n\tb"),
            "0..1 Identifier \"a\"\n1..2 LINE_BREAK\n3..3 INDENT_OPEN\n"
        );
    }

    #[test]
    fn test_format_structure_skips_content() {
        let tokens = vec![
            (Token::Content(ContentToken::Identifier), 0..1),
            (Token::Scanned(TokenKind::LineBreak), 1..2),
            (Token::Scanned(TokenKind::IndentClose), 2..2),
        ];
        assert_eq!(format_structure(&tokens), "LINE_BREAK INDENT_CLOSE");
    }
}
