//! Test factories for creating locations and spanned tokens succinctly

use std::ops::Range;

use crate::viewtree::token::{ContentToken, Token, TokenKind};

/// Canonical alias for spanned tokens used across tests
pub type Tokens = Vec<(Token, Range<usize>)>;

/// Make a single spanned token
pub fn mk_token(token: Token, start: usize, end: usize) -> (Token, Range<usize>) {
    (token, start..end)
}

/// Make a vector of spanned tokens from a list of (Token, start, end)
pub fn mk_tokens(entries: &[(Token, usize, usize)]) -> Tokens {
    entries
        .iter()
        .map(|&(token, start, end)| mk_token(token, start, end))
        .collect()
}

/// Shorthand for a scanner-produced token
pub fn scanned(kind: TokenKind) -> Token {
    Token::Scanned(kind)
}

/// Shorthand for a line-body token
pub fn content(token: ContentToken) -> Token {
    Token::Content(token)
}
