//! Token kinds produced by the indentation scanner
//!
//!     The scanner only ever produces the kinds in [TokenKind]. Everything else on a line is
//!     lexed by the host through [ContentToken](super::content::ContentToken). The grammar
//!     tells the scanner which kinds it can take at the current parse position through a
//!     [ValidTokens] mask, and the scanner never produces a kind outside of it.

use super::content::ContentToken;
use crate::viewtree::scanning::ScannerConfig;
use serde::Serialize;
use std::fmt;

/// Kinds the indentation scanner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// End of a logical line (LF or CR LF), or the synthetic one at end of input.
    LineBreak,
    /// The line is nested one level deeper than the previous open level.
    IndentOpen,
    /// One open level is closed.
    IndentClose,
    /// The line sits at the same depth as the open level.
    SameLevel,
    /// A comment running to the end of the line.
    Comment,
}

impl TokenKind {
    pub const ALL: [TokenKind; 5] = [
        TokenKind::LineBreak,
        TokenKind::IndentOpen,
        TokenKind::IndentClose,
        TokenKind::SameLevel,
        TokenKind::Comment,
    ];

    fn bit(self) -> u8 {
        match self {
            TokenKind::LineBreak => 1 << 0,
            TokenKind::IndentOpen => 1 << 1,
            TokenKind::IndentClose => 1 << 2,
            TokenKind::SameLevel => 1 << 3,
            TokenKind::Comment => 1 << 4,
        }
    }

    /// Check if this kind describes nesting (open, close or same level)
    pub fn is_indentation(&self) -> bool {
        matches!(
            self,
            TokenKind::IndentOpen | TokenKind::IndentClose | TokenKind::SameLevel
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LineBreak => "LINE_BREAK",
            TokenKind::IndentOpen => "INDENT_OPEN",
            TokenKind::IndentClose => "INDENT_CLOSE",
            TokenKind::SameLevel => "SAME_LEVEL",
            TokenKind::Comment => "COMMENT",
        };
        f.write_str(name)
    }
}

/// The acceptability mask: the set of kinds the grammar accepts at the current position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ValidTokens(u8);

impl ValidTokens {
    pub const fn empty() -> Self {
        ValidTokens(0)
    }

    pub fn all() -> Self {
        TokenKind::ALL.iter().fold(Self::empty(), |mask, kind| mask.with(*kind))
    }

    /// Every kind a scanner built with `config` is able to produce.
    pub fn for_config(config: &ScannerConfig) -> Self {
        let mut mask = Self::empty()
            .with(TokenKind::LineBreak)
            .with(TokenKind::IndentOpen)
            .with(TokenKind::IndentClose);
        if config.same_level {
            mask = mask.with(TokenKind::SameLevel);
        }
        if config.comment_prefix.is_some() {
            mask = mask.with(TokenKind::Comment);
        }
        mask
    }

    #[must_use]
    pub fn with(self, kind: TokenKind) -> Self {
        ValidTokens(self.0 | kind.bit())
    }

    #[must_use]
    pub fn without(self, kind: TokenKind) -> Self {
        ValidTokens(self.0 & !kind.bit())
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if any kind the indentation measurement can produce is accepted.
    pub fn accepts_indentation(&self) -> bool {
        self.contains(TokenKind::IndentOpen)
            || self.contains(TokenKind::IndentClose)
            || self.contains(TokenKind::SameLevel)
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        TokenKind::ALL
            .iter()
            .copied()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<TokenKind> for ValidTokens {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ValidTokens::empty(), |mask, kind| mask.with(kind))
    }
}

impl fmt::Debug for ValidTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A token in the stream produced by the host driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Token {
    /// Produced by the indentation scanner.
    Scanned(TokenKind),
    /// Produced by the line-body lexer.
    Content(ContentToken),
}

impl Token {
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Token::Scanned(kind) => Some(*kind),
            Token::Content(_) => None,
        }
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self, Token::Scanned(TokenKind::LineBreak))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Scanned(kind) => write!(f, "{}", kind),
            Token::Content(content) => write!(f, "{:?}", content),
        }
    }
}
