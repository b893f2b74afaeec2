//! Line-body token definitions for the view.tree format
//!
//!     Everything between the indentation and the line terminator is lexed with logos. None of
//!     these patterns match a line feed, so a content token never crosses into the next line
//!     and the scanner always gets to see the terminator.

use logos::Logos;
use serde::Serialize;
use std::ops::Range;

/// Tokens found in the body of a line
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentToken {
    /// `$my_component`
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    ComponentName,

    // Bindings
    #[token("<=>")]
    BindBoth,
    #[token("<=")]
    BindLeft,
    #[token("=>")]
    BindRight,

    #[token("^")]
    Caret,
    #[token("@")]
    At,
    #[token("/")]
    Slash,
    #[token("*")]
    Star,
    #[token("-")]
    Dash,

    /// `\` followed by the rest of the line
    #[regex(r"\\[^\r\n]*")]
    RawString,

    #[regex(
        r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?",
        priority = 3
    )]
    Number,

    /// Property names, optionally with `?`, `!` or `*` suffixes and a key: `value?`, `item*key`
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*([?!*]+[A-Za-z0-9_]*)?", priority = 3)]
    Identifier,

    // Spaces and tabs inside a line (leading tabs belong to the scanner)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Anything else, one character at a time
    #[regex(r"[^ \t\n]", priority = 1)]
    Unknown,
}

impl ContentToken {
    /// Lex the first content token at the start of `rest`.
    ///
    /// Returns the token and its byte length. Characters no pattern accepts come back as a
    /// one-character [ContentToken::Unknown] so the caller always makes progress. Returns
    /// `None` only for empty input.
    pub fn lex_one(rest: &str) -> Option<(ContentToken, usize)> {
        let first = rest.chars().next()?;
        let mut lexer = ContentToken::lexer(rest);
        match lexer.next() {
            Some(Ok(token)) => Some((token, lexer.span().end)),
            _ => Some((ContentToken::Unknown, first.len_utf8())),
        }
    }

    /// Check if this token carries no meaning for the grammar
    pub fn is_trivia(&self) -> bool {
        matches!(self, ContentToken::Whitespace)
    }
}

/// Tokenize a single line body with location information.
///
/// Stops at the first line terminator; the terminator itself is left to the scanner.
pub fn tokenize_line(line: &str, base: usize) -> Vec<(ContentToken, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < line.len() {
        let rest = &line[pos..];
        if rest.starts_with('\n') || rest.starts_with("\r\n") {
            break;
        }
        match ContentToken::lex_one(rest) {
            Some((token, len)) => {
                tokens.push((token, base + pos..base + pos + len));
                pos += len;
            }
            None => break,
        }
    }
    tokens
}
