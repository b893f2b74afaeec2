//! Common lexer module
//!
//! Output types shared by the host loop and the incremental lexer.

use crate::viewtree::scanning::{ScanError, Snapshot};
use crate::viewtree::token::{Token, TokenKind};
use std::fmt;
use std::ops::Range;

/// A problem found while lexing, at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub offset: usize,
    pub error: ScanError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.error, self.offset)
    }
}

/// A point lexing can resume from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    /// Byte offset of the first character after a line terminator (0 for the start).
    pub offset: usize,
    /// Number of tokens produced before this point.
    pub token_index: usize,
    pub snapshot: Snapshot,
}

/// One step of the host loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Token(Token, Range<usize>),
    Refused(Diagnostic),
    Done,
}

/// Everything lexing a source produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexerOutput {
    pub tokens: Vec<(Token, Range<usize>)>,
    pub diagnostics: Vec<Diagnostic>,
    pub checkpoints: Vec<Checkpoint>,
}

impl LexerOutput {
    /// The scanner-produced tokens only, without ranges.
    pub fn structure(&self) -> Vec<TokenKind> {
        self.tokens
            .iter()
            .filter_map(|(token, _)| token.kind())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Errors from [IncrementalLexer::edit](super::IncrementalLexer::edit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The edited range is reversed or reaches past the end of the source
    InvalidRange { start: usize, end: usize, len: usize },
    /// An edit boundary falls inside a multi-byte character
    NotCharBoundary(usize),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::InvalidRange { start, end, len } => write!(
                f,
                "Invalid edit range {}..{} for a source of {} bytes",
                start, end, len
            ),
            LexError::NotCharBoundary(offset) => {
                write!(f, "Edit boundary {} is not on a character boundary", offset)
            }
        }
    }
}

impl std::error::Error for LexError {}
