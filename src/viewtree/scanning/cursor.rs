//! Character cursor
//!
//!     The scanner reads its input through the [Cursor] trait, the same four primitives a
//!     grammar runtime hands to an external scanner: one character of lookahead, advance,
//!     mark the end of the current token, and end-of-input.
//!
//!     [SourceCursor] is the in-memory implementation used by the host driver. Its
//!     `begin_token` / `finish_token` pair models what a runtime does around each scanner call:
//!     open a token where the last one ended, then close it at the commit point.

use std::ops::Range;

pub trait Cursor {
    /// The next character, or `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Move past the lookahead character. `skip` marks it as insignificant whitespace that is
    /// not part of the token.
    fn advance(&mut self, skip: bool);

    /// Fix the end of the current token at the current position.
    fn mark_end(&mut self);

    fn is_eof(&self) -> bool {
        self.lookahead().is_none()
    }
}

/// Cursor over an in-memory source string, tracking byte offsets.
#[derive(Debug, Clone)]
pub struct SourceCursor<'a> {
    source: &'a str,
    pos: usize,
    token_start: usize,
    token_end: Option<usize>,
    /// Whether a significant character has been advanced over in the current token.
    started: bool,
}

impl<'a> SourceCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0)
    }

    /// A cursor resuming at byte `offset`. The offset is clamped to the source and moved back
    /// to the nearest character boundary.
    pub fn at(source: &'a str, offset: usize) -> Self {
        let mut pos = offset.min(source.len());
        while !source.is_char_boundary(pos) {
            pos -= 1;
        }
        SourceCursor {
            source,
            pos,
            token_start: pos,
            token_end: None,
            started: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread part of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Open a new token at the current position.
    pub fn begin_token(&mut self) {
        self.token_start = self.pos;
        self.token_end = None;
        self.started = false;
    }

    /// Close the current token and rewind to its commit point.
    ///
    /// The token ends at the last `mark_end`, or at the current position if `mark_end` was
    /// never called. Characters past the end are given back: the next token starts there.
    pub fn finish_token(&mut self) -> Range<usize> {
        let end = self.token_end.unwrap_or(self.pos);
        let start = self.token_start.min(end);
        self.pos = end;
        self.token_start = end;
        self.token_end = None;
        self.started = false;
        start..end
    }

    /// Jump to `offset` without producing a token (used after lexing content).
    pub fn reset_to(&mut self, offset: usize) {
        *self = SourceCursor::at(self.source, offset);
    }
}

impl Cursor for SourceCursor<'_> {
    fn lookahead(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, skip: bool) {
        if let Some(c) = self.lookahead() {
            self.pos += c.len_utf8();
            if skip && !self.started {
                self.token_start = self.pos;
            } else {
                self.started = true;
            }
        }
    }

    fn mark_end(&mut self) {
        self.token_end = Some(self.pos);
    }
}
