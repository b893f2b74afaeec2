//! Incremental re-lexing
//!
//!     An edit only needs to be re-lexed from the last checkpoint before it. Past the edited
//!     text, lexing can stop at the first checkpoint whose scanner state matches the one the
//!     previous run recorded for the same (shifted) text: from there on the old tokens are valid
//!     again and only their offsets move.

use super::common::{Checkpoint, LexError, LexerOutput};
use super::driver::{drive, tokenize, Lexer};
use crate::viewtree::scanning::ScannerConfig;
use crate::viewtree::token::Token;
use std::ops::Range;

/// How much of the token stream an edit touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    /// Tokens before the resume point, kept as they were.
    pub kept: usize,
    /// Tokens produced by re-lexing.
    pub relexed: usize,
    /// Tokens after the rejoin point, reused with shifted offsets.
    pub reused: usize,
}

#[derive(Debug, Clone)]
pub struct IncrementalLexer {
    source: String,
    config: ScannerConfig,
    output: LexerOutput,
}

impl IncrementalLexer {
    pub fn new(source: impl Into<String>, config: ScannerConfig) -> Self {
        let source = source.into();
        let output = tokenize(&source, &config);
        IncrementalLexer {
            source,
            config,
            output,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn tokens(&self) -> &[(Token, Range<usize>)] {
        &self.output.tokens
    }

    pub fn output(&self) -> &LexerOutput {
        &self.output
    }

    /// Replace `range` of the source with `replacement` and bring the tokens up to date.
    pub fn edit(
        &mut self,
        range: Range<usize>,
        replacement: &str,
    ) -> Result<EditOutcome, LexError> {
        self.check_range(&range)?;

        let mut source =
            String::with_capacity(self.source.len() - range.len() + replacement.len());
        source.push_str(&self.source[..range.start]);
        source.push_str(replacement);
        source.push_str(&self.source[range.end..]);
        // End of the inserted text in the new source
        let inserted_end = range.start + replacement.len();

        let old = std::mem::take(&mut self.output);
        let resume_index = match old
            .checkpoints
            .iter()
            .rposition(|cp| cp.offset <= range.start)
        {
            Some(index) => index,
            None => {
                self.output = tokenize(&source, &self.config);
                self.source = source;
                return Ok(EditOutcome {
                    kept: 0,
                    relexed: self.output.tokens.len(),
                    reused: 0,
                });
            }
        };
        let resume = &old.checkpoints[resume_index];

        let mut output = LexerOutput {
            tokens: old.tokens[..resume.token_index].to_vec(),
            diagnostics: old
                .diagnostics
                .iter()
                .filter(|diagnostic| diagnostic.offset < resume.offset)
                .cloned()
                .collect(),
            checkpoints: old.checkpoints[..=resume_index].to_vec(),
        };

        let mut rejoined = None;
        {
            let mut lexer = Lexer::resume(&source, self.config.clone(), resume);
            drive(&mut lexer, &mut output, |checkpoint| {
                if checkpoint.offset < inserted_end {
                    return false;
                }
                let old_offset = checkpoint.offset - inserted_end + range.end;
                match old
                    .checkpoints
                    .binary_search_by_key(&old_offset, |cp| cp.offset)
                {
                    Ok(index) if old.checkpoints[index].snapshot == checkpoint.snapshot => {
                        rejoined = Some(index);
                        true
                    }
                    _ => false,
                }
            });
        }

        let kept = resume.token_index;
        let relexed = output.tokens.len() - kept;
        let mut reused = 0;

        if let Some(index) = rejoined {
            let old_point = &old.checkpoints[index];
            let new_point = Checkpoint {
                offset: output.checkpoints.last().map_or(0, |cp| cp.offset),
                token_index: output.tokens.len(),
                snapshot: old_point.snapshot.clone(),
            };
            let shift = |offset: usize| offset - old_point.offset + new_point.offset;

            reused = old.tokens.len() - old_point.token_index;
            output.tokens.extend(
                old.tokens[old_point.token_index..]
                    .iter()
                    .map(|(token, span)| (*token, shift(span.start)..shift(span.end))),
            );
            output.diagnostics.extend(
                old.diagnostics
                    .iter()
                    .filter(|diagnostic| diagnostic.offset >= old_point.offset)
                    .map(|diagnostic| {
                        let mut diagnostic = diagnostic.clone();
                        diagnostic.offset = shift(diagnostic.offset);
                        diagnostic
                    }),
            );
            output
                .checkpoints
                .extend(old.checkpoints[index + 1..].iter().map(|cp| Checkpoint {
                    offset: shift(cp.offset),
                    token_index: cp.token_index - old_point.token_index + new_point.token_index,
                    snapshot: cp.snapshot.clone(),
                }));
        }

        self.source = source;
        self.output = output;
        Ok(EditOutcome {
            kept,
            relexed,
            reused,
        })
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), LexError> {
        let len = self.source.len();
        if range.start > range.end || range.end > len {
            return Err(LexError::InvalidRange {
                start: range.start,
                end: range.end,
                len,
            });
        }
        for offset in [range.start, range.end] {
            if !self.source.is_char_boundary(offset) {
                return Err(LexError::NotCharBoundary(offset));
            }
        }
        Ok(())
    }
}
